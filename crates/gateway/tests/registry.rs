//! Registry lookup and dispatch tests.

use whodini_gateway::{Adapter, Registry, Settings};
use llm::{Error, Provider};

fn registry() -> Registry {
    Registry::from_settings(&Settings::default())
}

#[test]
fn lookup_resolves_each_known_identifier() {
    let registry = registry();

    assert!(matches!(
        registry.lookup("ollama").unwrap(),
        Adapter::Ollama(_)
    ));
    assert!(matches!(
        registry.lookup("openai").unwrap(),
        Adapter::OpenAi(_)
    ));
    assert!(matches!(
        registry.lookup("perplexity").unwrap(),
        Adapter::Perplexity(_)
    ));
}

#[test]
fn lookup_rejects_unknown_identifier() {
    let err = registry().lookup("groq").unwrap_err();

    assert!(matches!(err, Error::UnsupportedProvider(_)));
    assert!(err.is_configuration());
    assert_eq!(err.to_string(), "unsupported provider: groq");
}

#[test]
fn get_matches_request_provider() {
    let registry = registry();

    assert!(matches!(registry.get(Provider::Ollama), Adapter::Ollama(_)));
    assert!(matches!(registry.get(Provider::OpenAi), Adapter::OpenAi(_)));
    assert!(matches!(
        registry.get(Provider::Perplexity),
        Adapter::Perplexity(_)
    ));
}
