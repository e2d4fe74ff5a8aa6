//! The unified streaming chunk shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One incremental piece of a streamed response.
///
/// A stream yields zero or more content chunks followed by at most one
/// terminal chunk (`done == true`). Chunks are append-only from the
/// caller's perspective — nothing is revised after emission.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StreamChunk {
    /// Incremental text. May be empty (notably on the terminal chunk).
    pub content: String,

    /// Whether this chunk ends the stream.
    #[serde(default)]
    pub done: bool,

    /// Provider-specific chunk metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl StreamChunk {
    /// A content chunk with metadata.
    pub fn text(content: impl Into<String>, metadata: Value) -> Self {
        Self {
            content: content.into(),
            done: false,
            metadata: Some(metadata),
        }
    }

    /// The terminal chunk: empty content, `done` set.
    pub fn terminal() -> Self {
        Self {
            content: String::new(),
            done: true,
            metadata: None,
        }
    }
}
