//! The provider-agnostic chat request.

use crate::{Message, Provider, Role};
use serde::{Deserialize, Serialize};

/// Temperature applied when the caller does not set one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A chat completion request. Owned by the caller for the duration of one
/// adapter invocation; adapters only read it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    /// The current user message.
    pub message: String,

    /// Model identifier, passed through to the backend.
    pub model: String,

    /// Which backend to dispatch to.
    pub provider: Provider,

    /// Whether the caller wants a streamed response.
    #[serde(default)]
    pub stream: bool,

    /// Prior turns, in conversation order.
    #[serde(default)]
    pub history: Vec<Message>,

    /// Optional system prompt, prepended to the conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Optional cap on generated tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature, semantically 0.0–2.0 (unenforced).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatRequest {
    /// Create a request with the fields every call needs; the rest default.
    pub fn new(message: impl Into<String>, model: impl Into<String>, provider: Provider) -> Self {
        Self {
            message: message.into(),
            model: model.into(),
            provider,
            stream: false,
            history: Vec::new(),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// The effective sampling temperature.
    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    /// Build the message-array payload shared by the hosted backends:
    /// optional leading system entry, history entries preserving their
    /// roles, and a trailing user entry with the current message.
    pub fn as_messages(&self) -> Vec<WireMessage<'_>> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);

        if let Some(system) = &self.system_prompt {
            messages.push(WireMessage {
                role: Role::System,
                content: system,
            });
        }

        for message in &self.history {
            messages.push(WireMessage {
                role: message.role,
                content: &message.content,
            });
        }

        messages.push(WireMessage {
            role: Role::User,
            content: &self.message,
        });

        messages
    }
}

/// A `{role, content}` pair as the hosted backends expect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WireMessage<'a> {
    /// Message role, serialized lowercase.
    pub role: Role,
    /// Message text.
    pub content: &'a str,
}
