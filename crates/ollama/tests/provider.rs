//! Adapter behavior without a reachable backend.

use std::time::Duration;
use llm::{ChatProvider, Client, Error};
use whodini_ollama::Ollama;

fn unreachable() -> Ollama {
    // Port 1 is never serving; connection is refused immediately.
    Ollama::new(Client::new(), "http://127.0.0.1:1", Duration::from_secs(1))
}

#[tokio::test]
async fn health_check_returns_false_when_unreachable() {
    assert!(!unreachable().health_check().await);
}

#[tokio::test]
async fn list_models_fails_without_partial_result() {
    let err = unreachable().list_models().await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert!(!err.is_configuration());
}

#[tokio::test]
async fn chat_surfaces_transport_failure() {
    let request = llm::ChatRequest::new(
        "hi",
        "llama3.2",
        llm::Provider::Ollama,
    );
    let err = unreachable().chat(&request).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}
