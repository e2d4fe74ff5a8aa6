//! OpenAI backend adapter.
//!
//! Talks to the OpenAI chat completions API: `/models` for the catalog and
//! reachability probe, `/chat/completions` for completions. Streaming uses
//! Server-Sent-Event framing with a `data: [DONE]` terminator.
//!
//! Without an API key the adapter degrades rather than breaks: the probe
//! reports unreachable, the catalog is empty, and completion calls fail
//! with a configuration error before any network I/O.

use llm::Client;

mod provider;

/// Default base URL of the OpenAI API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Catalog entries are kept only when the model id contains one of these
/// fragments; the rest of `/models` is embeddings, audio, and legacy.
pub const CHAT_MODELS: &[&str] = &["gpt-4", "gpt-4-turbo", "gpt-3.5-turbo", "gpt-4o"];

/// An OpenAI adapter instance.
#[derive(Clone, Debug)]
pub struct OpenAi {
    /// Shared HTTP client (connection pool).
    client: Client,
    /// Bearer credential; `None` means not configured.
    api_key: Option<String>,
    /// Base URL without a trailing slash.
    base_url: String,
}

impl OpenAi {
    /// Create an adapter for the official API endpoint.
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self::custom(client, api_key, DEFAULT_BASE_URL)
    }

    /// Create an adapter for a custom OpenAI-compatible endpoint.
    pub fn custom(client: Client, api_key: Option<String>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client,
            api_key: api_key.filter(|key| !key.is_empty()),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
