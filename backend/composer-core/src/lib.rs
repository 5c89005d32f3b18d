//! Resilient request execution and service orchestration for the background
//! composer service.
//!
//! Control flow for every operation:
//!
//! ```text
//! BackgroundComposerClient -> service adapter -> (EndpointResolver) -> TransportExecutor -> remote
//!                          <- normalizer <------------------------------------------------
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod normalizer;
pub mod payload;
pub mod resolver;
pub mod services;
pub mod tools;
pub mod transport;

#[cfg(test)]
mod tests;

pub use client::BackgroundComposerClient;
pub use client::probe::{ProbeResult, ProbeStatus};
pub use config::ClientConfig;
pub use error::composer_api::ComposerApiError;
pub use payload::{IdGenerator, UuidIdGenerator};
pub use tools::ComposerToolBox;
pub use transport::{HttpMethod, RequestDescriptor, TransportExecutor};
