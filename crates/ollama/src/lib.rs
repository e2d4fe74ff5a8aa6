//! Ollama backend adapter.
//!
//! Talks to a local Ollama instance over its native API: `/api/tags` for
//! the catalog and reachability probe, `/api/generate` for completions.
//! Ollama takes a single flattened prompt rather than a message array, and
//! streams newline-delimited JSON frames.

pub use prompt::build_prompt;

use llm::Client;
use std::time::Duration;

mod prompt;
mod provider;

/// Default base URL of a local Ollama instance.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default completion timeout. Local models can be slow to load and
/// generate, so this is far above the hosted-API timeouts.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// An Ollama adapter instance.
#[derive(Clone, Debug)]
pub struct Ollama {
    /// Shared HTTP client (connection pool).
    client: Client,
    /// Base URL without a trailing slash.
    base_url: String,
    /// Completion timeout for single-shot calls.
    timeout: Duration,
}

impl Ollama {
    /// Create an adapter for the given base URL and completion timeout.
    pub fn new(client: Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client,
            base_url,
            timeout,
        }
    }

    /// Create an adapter targeting `http://localhost:11434` with defaults.
    pub fn local(client: Client) -> Self {
        Self::new(client, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
