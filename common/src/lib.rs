//! Shared primitives for the background composer workspace.
//!
//! This crate holds the small types every other crate leans on. It has
//! no knowledge of the remote service - only error locations, status
//! classification and credential handling.
//!
//! ## Architecture
//!
//! - **common** (this crate): Cross-cutting primitives
//! - **models**: Pure data structures exchanged with the remote service
//! - **composer-core**: Request execution and service orchestration
//! - **composer-cli**: Binary wiring everything together

pub mod error;
pub mod http_status;
pub mod session_token;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use session_token::SessionToken;

#[cfg(test)]
mod tests;
