//! Health aggregation tests.

use std::collections::BTreeMap;
use whodini_gateway::{Health, HealthStatus, Registry, Settings};
use llm::Provider;

#[test]
fn one_reachable_provider_makes_the_gateway_healthy() {
    let health = Health::from_probes(BTreeMap::from([
        (Provider::Ollama, false),
        (Provider::OpenAi, true),
        (Provider::Perplexity, false),
    ]));

    assert_eq!(health.status, HealthStatus::Healthy);
    assert!(health.is_healthy());
    assert_eq!(health.providers[&Provider::OpenAi], true);
    assert_eq!(
        health.providers.values().filter(|&&up| up).count(),
        1
    );
}

#[test]
fn no_reachable_provider_is_unhealthy() {
    let health = Health::from_probes(BTreeMap::from([
        (Provider::Ollama, false),
        (Provider::OpenAi, false),
        (Provider::Perplexity, false),
    ]));

    assert_eq!(health.status, HealthStatus::Unhealthy);
    assert!(!health.is_healthy());
}

#[test]
fn health_report_serializes_with_wire_identifiers() {
    let health = Health::from_probes(BTreeMap::from([
        (Provider::Ollama, true),
        (Provider::OpenAi, false),
        (Provider::Perplexity, false),
    ]));

    let json = serde_json::to_value(&health).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["providers"]["ollama"], true);
    assert_eq!(json["providers"]["openai"], false);
}

#[tokio::test]
async fn aggregate_probe_never_fails_with_everything_down() {
    // Unroutable Ollama, no hosted credentials: every probe comes back
    // false and the aggregate completes without panicking.
    let settings = Settings {
        ollama_base_url: "http://127.0.0.1:1".to_owned(),
        openai_api_key: None,
        perplexity_api_key: None,
        ..Settings::default()
    };
    let registry = Registry::from_settings(&settings);

    let health = registry.health().await;
    assert_eq!(health.status, HealthStatus::Unhealthy);
    assert_eq!(health.providers.len(), 3);
    assert!(health.providers.values().all(|&up| !up));
}
