//! Gateway dispatch layer seams.
//!
//! `Registry` holds one adapter per backend behind the closed `Adapter`
//! enum and is constructed once at process start from `Settings`; the
//! routing layer looks up an adapter per request and calls through the
//! shared `ChatProvider` contract. `health` folds the per-adapter probes
//! into one reachability summary, and `sse` re-encodes chunk sequences
//! into the outgoing event-stream framing.

pub use health::{Health, HealthStatus};
pub use registry::{Adapter, Registry};
pub use settings::Settings;

mod health;
mod registry;
mod settings;
pub mod sse;
