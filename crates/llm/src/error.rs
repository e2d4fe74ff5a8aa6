//! Error taxonomy for the gateway core.
//!
//! Two classes matter to callers: configuration errors (unknown provider,
//! missing credential) surface immediately and are never retried; provider
//! errors (bad status, unexpected body) preserve the backend's raw error
//! text for diagnostics. Malformed frames inside a stream are not errors
//! at all; the decoders skip them locally.

use crate::Provider;

/// Result alias used across the gateway crates.
pub type Result<T> = std::result::Result<T, Error>;

/// A failure from an adapter or the registry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The provider identifier is not one of the registered backends.
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// The backend requires a credential that was not configured.
    #[error("{0} API key not configured")]
    NotConfigured(Provider),

    /// The backend answered with a non-success status.
    #[error("{provider} API error {status}: {body}")]
    Api {
        /// Which backend failed.
        provider: Provider,
        /// HTTP status code.
        status: u16,
        /// Raw error body as returned by the backend.
        body: String,
    },

    /// The backend answered 2xx but the body did not have the expected shape.
    #[error("{provider} returned an unexpected response: {reason}")]
    Malformed {
        /// Which backend failed.
        provider: Provider,
        /// What was missing or unparseable.
        reason: String,
    },

    /// Transport-level failure (connect, timeout, broken stream).
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Whether this is a configuration error rather than a provider failure.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::UnsupportedProvider(_) | Self::NotConfigured(_))
    }
}
