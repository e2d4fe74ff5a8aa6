//! `ChatProvider` implementation for Perplexity.

use crate::{KNOWN_MODELS, PROBE_MODEL, Perplexity};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{
    ChatProvider, ChatRequest, ChatResponse, Error, ModelInfo, Provider, Result, StreamChunk,
    WireMessage, decode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const CHAT_TIMEOUT: Duration = Duration::from_secs(60);

/// Body of a POST to `/chat/completions`.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> CompletionRequest<'a> {
    fn from_request(request: &'a ChatRequest, stream: bool) -> Self {
        Self {
            model: &request.model,
            messages: request.as_messages(),
            stream,
            temperature: request.temperature(),
            max_tokens: request.max_tokens,
        }
    }
}

/// A full (non-streamed) `/chat/completions` response, including the
/// Perplexity-specific `citations` list.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    model: String,
    id: Option<String>,
    created: Option<i64>,
    choices: Vec<CompletionChoice>,
    usage: Option<Value>,
    #[serde(default)]
    citations: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

/// One event-stream frame of a streamed completion.
#[derive(Debug, Deserialize)]
struct StreamFrame {
    model: Option<String>,
    id: Option<String>,
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    citations: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct Delta {
    content: Option<String>,
}

impl ChatProvider for Perplexity {
    async fn health_check(&self) -> bool {
        let Some(key) = &self.api_key else {
            return false;
        };

        // There is no catalog endpoint to probe, so send a deliberately
        // minimal completion. HTTP 400 means reachable-but-rejected, which
        // is still reachable.
        let probe = json!({
            "model": PROBE_MODEL,
            "messages": [{"role": "user", "content": "test"}],
            "max_tokens": 1,
        });

        let result = self
            .client
            .post(self.url("/chat/completions"))
            .bearer_auth(key)
            .timeout(PROBE_TIMEOUT)
            .json(&probe)
            .send()
            .await;

        matches!(result, Ok(response) if matches!(response.status().as_u16(), 200 | 400))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        // Fixed catalog, no network call. An unconfigured adapter still
        // advertises nothing.
        if self.api_key.is_none() {
            return Ok(Vec::new());
        }

        Ok(KNOWN_MODELS
            .iter()
            .map(|(name, description)| ModelInfo {
                name: (*name).to_owned(),
                provider: Provider::Perplexity,
                size: None,
                modified_at: None,
                description: Some((*description).to_owned()),
            })
            .collect())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let Some(key) = &self.api_key else {
            return Err(Error::NotConfigured(Provider::Perplexity));
        };

        let body = CompletionRequest::from_request(request, false);
        tracing::debug!(model = %request.model, "perplexity chat completion");

        let response = self
            .client
            .post(self.url("/chat/completions"))
            .bearer_auth(key)
            .timeout(CHAT_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                provider: Provider::Perplexity,
                status: status.as_u16(),
                body,
            });
        }

        let data: CompletionResponse = response.json().await.map_err(|e| Error::Malformed {
            provider: Provider::Perplexity,
            reason: e.to_string(),
        })?;

        let choice = data.choices.into_iter().next().ok_or_else(|| Error::Malformed {
            provider: Provider::Perplexity,
            reason: "empty choices".to_owned(),
        })?;

        Ok(ChatResponse {
            message: choice.message.content,
            model: data.model,
            provider: Provider::Perplexity,
            usage: data.usage,
            metadata: Some(json!({
                "finish_reason": choice.finish_reason,
                "id": data.id,
                "created": data.created,
                "citations": data.citations,
            })),
        })
    }

    fn chat_stream(&self, request: &ChatRequest) -> impl Stream<Item = Result<StreamChunk>> + Send {
        let builder = self.api_key.as_ref().map(|key| {
            let body = CompletionRequest::from_request(request, true);
            self.client
                .post(self.url("/chat/completions"))
                .bearer_auth(key)
                .json(&body)
        });
        let model = request.model.clone();

        try_stream! {
            let builder = builder.ok_or(Error::NotConfigured(Provider::Perplexity))?;
            tracing::debug!(model = %model, "perplexity chat completion stream");
            let response = builder.send().await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                Err(Error::Api {
                    provider: Provider::Perplexity,
                    status: status.as_u16(),
                    body,
                })?;
            } else {
                let chunks = decode::event_stream(response.bytes_stream(), |frame: StreamFrame| {
                    let citations = frame.citations;
                    let choice = frame.choices.into_iter().next()?;
                    let content = choice.delta.content?;
                    Some(StreamChunk::text(
                        content,
                        json!({
                            "model": frame.model,
                            "id": frame.id,
                            "finish_reason": choice.finish_reason,
                            "citations": citations,
                        }),
                    ))
                });

                let mut chunks = std::pin::pin!(chunks);
                while let Some(chunk) = chunks.next().await {
                    yield chunk?;
                }
            }
        }
    }
}
