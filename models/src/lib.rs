//! Domain models for the background composer service.
//!
//! Pure data structures mirroring what the remote service sends and
//! receives. Every response field is optional: when the remote changes a
//! shape, consumers see missing values instead of decode failures.

pub mod composer;
pub mod dashboard;
pub mod error;
mod lenient;
pub mod normalized;
pub mod user;

pub use common::ErrorLocation;

pub use composer::options::{
    CreateComposerOptions, CreateComposerOptionsBuilder, DEFAULT_BRANCH, DEFAULT_MODEL,
};
pub use composer::{
    ActionResponse, BackgroundComposer, ChangesHashResponse, ComposerList, ComposerSubmission,
    CreateComposerResponse, CreatedComposer, DetailedComposer, DiffDetailsResponse,
    OpenPrResponse,
};
pub use dashboard::PrivacyModeResponse;
pub use error::model_error::ModelError;
pub use normalized::NormalizedResponse;
pub use user::{UserSettings, WebAccessResponse};

#[cfg(test)]
mod tests;
