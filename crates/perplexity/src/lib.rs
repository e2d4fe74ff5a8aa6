//! Perplexity backend adapter.
//!
//! Talks to the Perplexity chat completions API, which is shaped like
//! OpenAI's with two differences: there is no `/models` endpoint (the
//! catalog here is a fixed list, and the reachability probe is a 1-token
//! test completion), and responses carry `citations` from the models with
//! web access.

use llm::Client;

mod provider;

/// Default base URL of the Perplexity API.
pub const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";

/// The model used by the reachability probe.
pub const PROBE_MODEL: &str = "llama-3.1-sonar-small-128k-online";

/// The fixed catalog: Perplexity has no models endpoint.
pub const KNOWN_MODELS: &[(&str, &str)] = &[
    (
        "llama-3.1-sonar-small-128k-online",
        "Llama 3.1 Sonar Small 128K Online - Fast model with web access",
    ),
    (
        "llama-3.1-sonar-large-128k-online",
        "Llama 3.1 Sonar Large 128K Online - Powerful model with web access",
    ),
    (
        "llama-3.1-sonar-huge-128k-online",
        "Llama 3.1 Sonar Huge 128K Online - Most capable model with web access",
    ),
    (
        "llama-3.1-8b-instruct",
        "Llama 3.1 8B Instruct - Fast offline model",
    ),
    (
        "llama-3.1-70b-instruct",
        "Llama 3.1 70B Instruct - Powerful offline model",
    ),
];

/// A Perplexity adapter instance.
#[derive(Clone, Debug)]
pub struct Perplexity {
    /// Shared HTTP client (connection pool).
    client: Client,
    /// Bearer credential; `None` means not configured.
    api_key: Option<String>,
    /// Base URL without a trailing slash.
    base_url: String,
}

impl Perplexity {
    /// Create an adapter for the official API endpoint.
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self::custom(client, api_key, DEFAULT_BASE_URL)
    }

    /// Create an adapter for a custom endpoint.
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
