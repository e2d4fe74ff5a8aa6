//! Reachability aggregation across all registered adapters.

use crate::Registry;
use llm::{ChatProvider, Provider};
use serde::Serialize;
use std::collections::BTreeMap;

/// Overall gateway reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// At least one backend is reachable.
    Healthy,
    /// No backend is reachable.
    Unhealthy,
}

/// One reachability summary: per-provider probe results plus the fold.
#[derive(Debug, Clone, Serialize)]
pub struct Health {
    /// Overall status.
    pub status: HealthStatus,
    /// Per-provider probe outcome.
    pub providers: BTreeMap<Provider, bool>,
}

impl Health {
    /// Whether any backend is reachable.
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }

    /// Fold individual probe results into one summary: healthy iff any
    /// probe came back true.
    pub fn from_probes(probes: BTreeMap<Provider, bool>) -> Self {
        let status = if probes.values().any(|&up| up) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };
        Self {
            status,
            providers: probes,
        }
    }
}

impl Registry {
    /// Probe every adapter concurrently and fold the results. One probe
    /// failing (or hanging until its own timeout) never prevents the
    /// others from completing; the aggregate takes as long as the slowest
    /// probe and no longer.
    pub async fn health(&self) -> Health {
        let (ollama, openai, perplexity) = tokio::join!(
            self.get(Provider::Ollama).health_check(),
            self.get(Provider::OpenAi).health_check(),
            self.get(Provider::Perplexity).health_check(),
        );

        let probes = BTreeMap::from([
            (Provider::Ollama, ollama),
            (Provider::OpenAi, openai),
            (Provider::Perplexity, perplexity),
        ]);

        tracing::debug!(?probes, "health probes complete");
        Health::from_probes(probes)
    }
}
