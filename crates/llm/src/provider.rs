//! Provider identifiers and the adapter contract.

use crate::{ChatRequest, ChatResponse, Error, ModelInfo, Result, StreamChunk};
use futures_core::Stream;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The backends the gateway can dispatch to. Closed set; dispatch is an
/// exhaustive match, never a string lookup.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Local Ollama instance.
    #[default]
    Ollama,
    /// OpenAI chat completions API.
    OpenAi,
    /// Perplexity chat completions API.
    Perplexity,
}

impl Provider {
    /// The wire identifier of this provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::OpenAi => "openai",
            Self::Perplexity => "perplexity",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAi),
            "perplexity" => Ok(Self::Perplexity),
            other => Err(Error::UnsupportedProvider(other.to_owned())),
        }
    }
}

/// The contract shared by all backend adapters.
///
/// Adapters only read the request; a `ChatRequest` is never mutated by a
/// call. Each streaming call opens a fresh connection; streams are
/// restartable from scratch, not resumable.
pub trait ChatProvider {
    /// Probe backend reachability. Never fails: any network error, timeout,
    /// or non-success status maps to `false`.
    fn health_check(&self) -> impl Future<Output = bool> + Send;

    /// Fetch the model catalog. A backend without a configured credential
    /// returns an empty list rather than an error; a catalog call that
    /// fails returns no partial list.
    fn list_models(&self) -> impl Future<Output = Result<Vec<ModelInfo>>> + Send;

    /// Single-shot chat completion: one POST, one response, no retry.
    fn chat(&self, request: &ChatRequest) -> impl Future<Output = Result<ChatResponse>> + Send;

    /// Streaming chat completion. Chunks arrive in backend order; a failure
    /// mid-stream is raised at the point of failure within the sequence and
    /// does not invalidate chunks already yielded.
    fn chat_stream(
        &self,
        request: &ChatRequest,
    ) -> impl Stream<Item = Result<StreamChunk>> + Send;
}
