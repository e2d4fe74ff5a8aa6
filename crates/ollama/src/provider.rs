//! `ChatProvider` implementation for Ollama.

use crate::{Ollama, build_prompt};
use async_stream::try_stream;
use chrono::{DateTime, Utc};
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{
    ChatProvider, ChatRequest, ChatResponse, Error, ModelInfo, Provider, Result, StreamChunk,
    decode,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const CATALOG_TIMEOUT: Duration = Duration::from_secs(10);

/// Body of a POST to `/api/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

impl GenerateRequest {
    fn from_request(request: &ChatRequest, stream: bool) -> Self {
        Self {
            model: request.model.clone(),
            prompt: build_prompt(request),
            stream,
            options: GenerateOptions {
                temperature: request.temperature(),
                num_predict: request.max_tokens,
            },
        }
    }
}

/// One `/api/generate` response object: the full body when not streaming,
/// one NDJSON frame when streaming.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
    prompt_eval_count: Option<u64>,
    eval_count: Option<u64>,
    total_duration: Option<u64>,
    load_duration: Option<u64>,
    prompt_eval_duration: Option<u64>,
    eval_duration: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
    size: Option<u64>,
    modified_at: Option<DateTime<Utc>>,
}

impl ChatProvider for Ollama {
    async fn health_check(&self) -> bool {
        let result = self
            .client
            .get(self.url("/api/tags"))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await;
        matches!(result, Ok(response) if response.status().is_success())
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let response = self
            .client
            .get(self.url("/api/tags"))
            .timeout(CATALOG_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                provider: Provider::Ollama,
                status: status.as_u16(),
                body,
            });
        }

        let tags: TagsResponse = response.json().await.map_err(|e| Error::Malformed {
            provider: Provider::Ollama,
            reason: e.to_string(),
        })?;

        Ok(tags
            .models
            .into_iter()
            .map(|entry| ModelInfo {
                description: Some(format!("Ollama model: {}", entry.name)),
                provider: Provider::Ollama,
                size: entry.size,
                modified_at: entry.modified_at,
                name: entry.name,
            })
            .collect())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let body = GenerateRequest::from_request(request, false);
        tracing::debug!(model = %request.model, "ollama generate");

        let response = self
            .client
            .post(self.url("/api/generate"))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                provider: Provider::Ollama,
                status: status.as_u16(),
                body,
            });
        }

        let data: GenerateResponse = response.json().await.map_err(|e| Error::Malformed {
            provider: Provider::Ollama,
            reason: e.to_string(),
        })?;

        let prompt_tokens = data.prompt_eval_count.unwrap_or(0);
        let completion_tokens = data.eval_count.unwrap_or(0);

        Ok(ChatResponse {
            message: data.response,
            model: request.model.clone(),
            provider: Provider::Ollama,
            usage: Some(json!({
                "prompt_tokens": prompt_tokens,
                "completion_tokens": completion_tokens,
                "total_tokens": prompt_tokens + completion_tokens,
            })),
            metadata: Some(json!({
                "done": data.done,
                "total_duration": data.total_duration,
                "load_duration": data.load_duration,
                "prompt_eval_duration": data.prompt_eval_duration,
                "eval_duration": data.eval_duration,
            })),
        })
    }

    fn chat_stream(&self, request: &ChatRequest) -> impl Stream<Item = Result<StreamChunk>> + Send {
        let body = GenerateRequest::from_request(request, true);
        let model = request.model.clone();
        // No per-request timeout here: it would cover the whole body read
        // and kill long generations.
        let builder = self.client.post(self.url("/api/generate")).json(&body);

        try_stream! {
            tracing::debug!(model = %model, "ollama generate stream");
            let response = builder.send().await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                Err(Error::Api {
                    provider: Provider::Ollama,
                    status: status.as_u16(),
                    body,
                })?;
            } else {
                let chunks = decode::ndjson(response.bytes_stream(), |frame: GenerateResponse| {
                    StreamChunk {
                        metadata: Some(json!({
                            "model": model.as_str(),
                            "eval_count": frame.eval_count,
                            "eval_duration": frame.eval_duration,
                        })),
                        content: frame.response,
                        done: frame.done,
                    }
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
    fn generate_payload_nests_options() {
        let mut request = ChatRequest::new("hi", "llama3.2", Provider::Ollama);
        request.max_tokens = Some(128);
        request.temperature = Some(0.2);

        let payload = serde_json::to_value(GenerateRequest::from_request(&request, true)).unwrap();
        assert_eq!(payload["model"], "llama3.2");
        assert_eq!(payload["stream"], true);
        assert_eq!(payload["options"]["temperature"], 0.2f32 as f64);
        assert_eq!(payload["options"]["num_predict"], 128);
    }

    #[test]
    fn generate_payload_omits_num_predict_without_max_tokens() {
        let request = ChatRequest::new("hi", "llama3.2", Provider::Ollama);
        let payload = serde_json::to_value(GenerateRequest::from_request(&request, false)).unwrap();

        assert!(payload["options"].get("num_predict").is_none());
        assert_eq!(payload["options"]["temperature"], 0.7f32 as f64);
    }
}
