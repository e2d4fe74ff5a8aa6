//! Adapter construction and provider dispatch.
//!
//! `Adapter` is enum dispatch over the three concrete backends: the
//! request's `provider` field selects exactly one arm, exhaustively.

use crate::Settings;
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{
    ChatProvider, ChatRequest, ChatResponse, Client, ModelInfo, Provider, Result, StreamChunk,
};
use ollama::Ollama;
use openai::OpenAi;
use perplexity::Perplexity;
use std::time::Duration;

/// A backend adapter behind one dispatchable type.
#[derive(Clone, Debug)]
pub enum Adapter {
    /// Local Ollama instance.
    Ollama(Ollama),
    /// OpenAI chat completions API.
    OpenAi(OpenAi),
    /// Perplexity chat completions API.
    Perplexity(Perplexity),
}

impl ChatProvider for Adapter {
    async fn health_check(&self) -> bool {
        match self {
            Self::Ollama(p) => p.health_check().await,
            Self::OpenAi(p) => p.health_check().await,
            Self::Perplexity(p) => p.health_check().await,
        }
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        match self {
            Self::Ollama(p) => p.list_models().await,
            Self::OpenAi(p) => p.list_models().await,
            Self::Perplexity(p) => p.list_models().await,
        }
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        match self {
            Self::Ollama(p) => p.chat(request).await,
            Self::OpenAi(p) => p.chat(request).await,
            Self::Perplexity(p) => p.chat(request).await,
        }
    }

    fn chat_stream(&self, request: &ChatRequest) -> impl Stream<Item = Result<StreamChunk>> + Send {
        let this = self.clone();
        let request = request.clone();
        try_stream! {
            match this {
                Self::Ollama(p) => {
                    let mut chunks = std::pin::pin!(p.chat_stream(&request));
                    while let Some(chunk) = chunks.next().await {
                        yield chunk?;
                    }
                }
                Self::OpenAi(p) => {
                    let mut chunks = std::pin::pin!(p.chat_stream(&request));
                    while let Some(chunk) = chunks.next().await {
                        yield chunk?;
                    }
                }
                Self::Perplexity(p) => {
                    let mut chunks = std::pin::pin!(p.chat_stream(&request));
                    while let Some(chunk) = chunks.next().await {
                        yield chunk?;
                    }
                }
            }
        }
    }
}

/// The fixed provider → adapter mapping, constructed once at process start
/// and shared read-only across all calls.
pub struct Registry {
    ollama: Adapter,
    openai: Adapter,
    perplexity: Adapter,
}

impl Registry {
    /// Build all adapters from settings with a fresh shared HTTP client.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    /// Build all adapters from settings over the given client. All three
    /// share its connection pool; the pool outlives any one request.
    pub fn with_client(client: Client, settings: &Settings) -> Self {
        Self {
            ollama: Adapter::Ollama(Ollama::new(
                client.clone(),
                settings.ollama_base_url.clone(),
                Duration::from_secs(settings.ollama_timeout_secs),
            )),
            openai: Adapter::OpenAi(OpenAi::new(client.clone(), settings.openai_api_key.clone())),
            perplexity: Adapter::Perplexity(Perplexity::new(
                client,
                settings.perplexity_api_key.clone(),
            )),
        }
    }

    /// The adapter for a provider. Infallible since the set is closed.
    pub fn get(&self, provider: Provider) -> &Adapter {
        match provider {
            Provider::Ollama => &self.ollama,
            Provider::OpenAi => &self.openai,
            Provider::Perplexity => &self.perplexity,
        }
    }

    /// Look up an adapter by wire identifier. An unknown identifier fails
    /// with a configuration error before any adapter method is invoked.
    pub fn lookup(&self, id: &str) -> Result<&Adapter> {
        Ok(self.get(id.parse()?))
    }
}
