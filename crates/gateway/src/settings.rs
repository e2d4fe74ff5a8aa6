//! Gateway configuration, read once at startup.

use serde::Deserialize;

/// Configuration surface for the gateway core. The rate-limit values are
/// carried for the outer layers; the core does not enforce them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the local Ollama instance.
    pub ollama_base_url: String,

    /// Completion timeout for Ollama single-shot calls, in seconds.
    pub ollama_timeout_secs: u64,

    /// OpenAI API key. `None` leaves that adapter unconfigured.
    pub openai_api_key: Option<String>,

    /// Perplexity API key. `None` leaves that adapter unconfigured.
    pub perplexity_api_key: Option<String>,

    /// CORS allow-list for the routing layer.
    pub allowed_origins: Vec<String>,

    /// Requests allowed per rate-limit window (unenforced here).
    pub rate_limit_requests: u32,

    /// Rate-limit window length in seconds (unenforced here).
    pub rate_limit_window_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ollama_base_url: ollama::DEFAULT_BASE_URL.to_owned(),
            ollama_timeout_secs: 300,
            openai_api_key: None,
            perplexity_api_key: None,
            allowed_origins: vec![
                "http://localhost:3000".to_owned(),
                "http://localhost:8000".to_owned(),
                "*".to_owned(),
            ],
            rate_limit_requests: 100,
            rate_limit_window_secs: 60,
        }
    }
}

impl Settings {
    /// Read settings from the process environment. Unset or unparseable
    /// variables fall back to the defaults above; empty API keys count as
    /// unconfigured.
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(url) = std::env::var("OLLAMA_BASE_URL") {
            settings.ollama_base_url = url;
        }
        if let Ok(timeout) = std::env::var("OLLAMA_TIMEOUT")
            && let Ok(secs) = timeout.parse()
        {
            settings.ollama_timeout_secs = secs;
        }
        settings.openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        settings.perplexity_api_key = std::env::var("PERPLEXITY_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        settings
    }
}
