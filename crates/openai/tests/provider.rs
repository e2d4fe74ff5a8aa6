//! Adapter behavior without a configured credential.
//!
//! The base URL points at a closed local port: if any of these calls were
//! to touch the network, they would surface a transport error instead of
//! the expected configuration behavior.

use futures_util::StreamExt;
use llm::{ChatProvider, ChatRequest, Client, Error, Provider};
use whodini_openai::OpenAi;

fn unconfigured() -> OpenAi {
    OpenAi::custom(Client::new(), None, "http://127.0.0.1:1")
}

fn request() -> ChatRequest {
    ChatRequest::new("hi", "gpt-4o", Provider::OpenAi)
}

#[tokio::test]
async fn chat_without_key_is_a_configuration_error() {
    let err = unconfigured().chat(&request()).await.unwrap_err();
    assert!(matches!(err, Error::NotConfigured(Provider::OpenAi)));
    assert!(err.is_configuration());
}

#[tokio::test]
async fn chat_stream_without_key_fails_on_first_poll() {
    let adapter = unconfigured();
    let request = request();
    let mut chunks = std::pin::pin!(adapter.chat_stream(&request));

    let first = chunks.next().await.expect("one item");
    assert!(matches!(
        first.unwrap_err(),
        Error::NotConfigured(Provider::OpenAi)
    ));
    assert!(chunks.next().await.is_none());
}

#[tokio::test]
async fn list_models_without_key_is_empty() {
    let models = unconfigured().list_models().await.unwrap();
    assert!(models.is_empty());
}

#[tokio::test]
async fn health_check_without_key_is_false() {
    assert!(!unconfigured().health_check().await);
}

#[tokio::test]
async fn empty_key_counts_as_unconfigured() {
    let adapter = OpenAi::custom(Client::new(), Some(String::new()), "http://127.0.0.1:1");
    let err = adapter.chat(&request()).await.unwrap_err();
    assert!(err.is_configuration());
}
