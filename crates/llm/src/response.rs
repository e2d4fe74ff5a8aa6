//! Unified response and catalog types.

use crate::Provider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A complete (non-streamed) chat completion.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatResponse {
    /// The generated assistant message.
    pub message: String,

    /// The model that produced it.
    pub model: String,

    /// The backend that produced it.
    pub provider: Provider,

    /// Token accounting. The exact key set is provider-dependent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,

    /// Provider-specific diagnostic fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// A model advertised by a backend's catalog. Never persisted; refetched
/// on every listing call.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelInfo {
    /// Model name as the backend knows it.
    pub name: String,

    /// The backend offering the model.
    pub provider: Provider,

    /// Model size in bytes, where the catalog reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Last modification time, where the catalog reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,

    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
