//! `ChatProvider` implementation for OpenAI.

use crate::{CHAT_MODELS, OpenAi};
use async_stream::try_stream;
use chrono::DateTime;
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
const CATALOG_TIMEOUT: Duration = Duration::from_secs(10);
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

/// A full (non-streamed) `/chat/completions` response. `model` and the
/// first choice's message are required; their absence is a malformed
/// response, not a silent default.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    model: String,
    id: Option<String>,
    created: Option<i64>,
    choices: Vec<CompletionChoice>,
    usage: Option<Value>,
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

impl ChatProvider for OpenAi {
    async fn health_check(&self) -> bool {
        let Some(key) = &self.api_key else {
            return false;
        };
        let result = self
            .client
            .get(self.url("/models"))
            .bearer_auth(key)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await;
        matches!(result, Ok(response) if response.status().is_success())
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let Some(key) = &self.api_key else {
            return Ok(Vec::new());
        };

        let response = self
            .client
            .get(self.url("/models"))
            .bearer_auth(key)
            .timeout(CATALOG_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                provider: Provider::OpenAi,
                status: status.as_u16(),
                body,
            });
        }

        #[derive(Deserialize)]
        struct ModelsResponse {
            #[serde(default)]
            data: Vec<ModelEntry>,
        }

        #[derive(Deserialize)]
        struct ModelEntry {
            id: String,
            created: Option<i64>,
        }

        let catalog: ModelsResponse = response.json().await.map_err(|e| Error::Malformed {
            provider: Provider::OpenAi,
            reason: e.to_string(),
        })?;

        Ok(catalog
            .data
            .into_iter()
            .filter(|entry| CHAT_MODELS.iter().any(|fragment| entry.id.contains(fragment)))
            .map(|entry| ModelInfo {
                description: Some(format!("OpenAI model: {}", entry.id)),
                provider: Provider::OpenAi,
                size: None,
                modified_at: entry
                    .created
                    .and_then(|secs| DateTime::from_timestamp(secs, 0)),
                name: entry.id,
            })
            .collect())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let Some(key) = &self.api_key else {
            return Err(Error::NotConfigured(Provider::OpenAi));
        };

        let body = CompletionRequest::from_request(request, false);
        tracing::debug!(model = %request.model, "openai chat completion");

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
                provider: Provider::OpenAi,
                status: status.as_u16(),
                body,
            });
        }

        let data: CompletionResponse = response.json().await.map_err(|e| Error::Malformed {
            provider: Provider::OpenAi,
            reason: e.to_string(),
        })?;

        let choice = data.choices.into_iter().next().ok_or_else(|| Error::Malformed {
            provider: Provider::OpenAi,
            reason: "empty choices".to_owned(),
        })?;

        Ok(ChatResponse {
            message: choice.message.content,
            model: data.model,
            provider: Provider::OpenAi,
            usage: data.usage,
            metadata: Some(json!({
                "finish_reason": choice.finish_reason,
                "id": data.id,
                "created": data.created,
            })),
        })
    }

    fn chat_stream(&self, request: &ChatRequest) -> impl Stream<Item = Result<StreamChunk>> + Send {
        // Serialize the payload and bind the credential up front; a missing
        // key fails on the first poll without touching the network.
        let builder = self.api_key.as_ref().map(|key| {
            let body = CompletionRequest::from_request(request, true);
            self.client
                .post(self.url("/chat/completions"))
                .bearer_auth(key)
                .json(&body)
        });
        let model = request.model.clone();

        try_stream! {
            let builder = builder.ok_or(Error::NotConfigured(Provider::OpenAi))?;
            tracing::debug!(model = %model, "openai chat completion stream");
            let response = builder.send().await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                Err(Error::Api {
                    provider: Provider::OpenAi,
                    status: status.as_u16(),
                    body,
                })?;
            } else {
                let chunks = decode::event_stream(response.bytes_stream(), |frame: StreamFrame| {
                    let choice = frame.choices.into_iter().next()?;
                    let content = choice.delta.content?;
                    Some(StreamChunk::text(
                        content,
                        json!({
                            "model": frame.model,
                            "id": frame.id,
                            "finish_reason": choice.finish_reason,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_payload_sets_top_level_fields() {
        let mut request = ChatRequest::new("hi", "gpt-4o", Provider::OpenAi);
        request.max_tokens = Some(64);

        let payload = serde_json::to_value(CompletionRequest::from_request(&request, true)).unwrap();
        assert_eq!(payload["model"], "gpt-4o");
        assert_eq!(payload["stream"], true);
        assert_eq!(payload["max_tokens"], 64);
        assert_eq!(payload["messages"][0]["role"], "user");
        assert_eq!(payload["messages"][0]["content"], "hi");
    }

    #[test]
    fn completion_payload_omits_max_tokens_when_unset() {
        let request = ChatRequest::new("hi", "gpt-4o", Provider::OpenAi);
        let payload =
            serde_json::to_value(CompletionRequest::from_request(&request, false)).unwrap();

        assert!(payload.get("max_tokens").is_none());
        assert_eq!(payload["temperature"], 0.7f32 as f64);
    }
}
