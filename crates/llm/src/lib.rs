//! Unified conversation model and provider contract.
//!
//! This crate provides the shared types used across all backend adapters:
//! `Message`, `ChatRequest`, `ChatResponse`, `StreamChunk`, `ModelInfo`,
//! the `ChatProvider` trait, the gateway `Error` taxonomy, and the wire
//! decoders that normalize NDJSON and event-stream framings into one chunk
//! shape.

pub use decode::{DONE_SENTINEL, event_stream, ndjson};
pub use error::{Error, Result};
pub use message::{Message, Role};
pub use provider::{ChatProvider, Provider};
pub use request::{ChatRequest, DEFAULT_TEMPERATURE, WireMessage};
pub use response::{ChatResponse, ModelInfo};
pub use reqwest::{self, Client};
pub use stream::StreamChunk;

pub mod decode;
mod error;
mod message;
mod provider;
mod request;
mod response;
mod stream;
