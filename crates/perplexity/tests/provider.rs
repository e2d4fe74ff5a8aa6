//! Catalog and credential behavior.

use futures_util::StreamExt;
use llm::{ChatProvider, ChatRequest, Client, Error, Provider};
use whodini_perplexity::Perplexity;

fn configured() -> Perplexity {
    // The static catalog needs a key but never touches the network; the
    // closed port guards against any accidental call.
    Perplexity::custom(Client::new(), Some("pplx-test".to_owned()), "http://127.0.0.1:1")
}

fn unconfigured() -> Perplexity {
    Perplexity::custom(Client::new(), None, "http://127.0.0.1:1")
}

#[tokio::test]
async fn catalog_is_the_fixed_model_list() {
    let models = configured().list_models().await.unwrap();

    assert_eq!(models.len(), 5);
    assert!(models.iter().all(|m| m.provider == Provider::Perplexity));
    assert_eq!(models[0].name, "llama-3.1-sonar-small-128k-online");
    assert!(
        models
            .iter()
            .any(|m| m.name == "llama-3.1-70b-instruct")
    );
    assert!(models.iter().all(|m| m.description.is_some()));
}

#[tokio::test]
async fn catalog_is_empty_without_key() {
    let models = unconfigured().list_models().await.unwrap();
    assert!(models.is_empty());
}

#[tokio::test]
async fn chat_without_key_is_a_configuration_error() {
    let request = ChatRequest::new("hi", "llama-3.1-8b-instruct", Provider::Perplexity);
    let err = unconfigured().chat(&request).await.unwrap_err();
    assert!(matches!(err, Error::NotConfigured(Provider::Perplexity)));
}

#[tokio::test]
async fn chat_stream_without_key_fails_on_first_poll() {
    let adapter = unconfigured();
    let request = ChatRequest::new("hi", "llama-3.1-8b-instruct", Provider::Perplexity);
    let mut chunks = std::pin::pin!(adapter.chat_stream(&request));

    assert!(matches!(
        chunks.next().await.expect("one item").unwrap_err(),
        Error::NotConfigured(Provider::Perplexity)
    ));
}

#[tokio::test]
async fn health_check_without_key_is_false() {
    assert!(!unconfigured().health_check().await);
}
