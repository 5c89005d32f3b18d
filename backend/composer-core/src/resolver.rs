//! Ordered fallback across candidate paths for routes that are not confirmed.

use crate::error::composer_api::ComposerApiError;
use crate::transport::{RequestDescriptor, TransportExecutor};

use log::{debug, info};
use serde_json::Value;

/// Result of a single candidate attempt.
#[derive(Debug)]
pub enum CandidateOutcome {
    Success(Value),
    NotFound,
    Failed(ComposerApiError),
}

impl From<Result<Value, ComposerApiError>> for CandidateOutcome {
    fn from(result: Result<Value, ComposerApiError>) -> Self {
        match result {
            Ok(value) => CandidateOutcome::Success(value),
            Err(error) if error.is_not_found() => CandidateOutcome::NotFound,
            Err(error) => CandidateOutcome::Failed(error),
        }
    }
}

pub struct EndpointResolver<'a> {
    transport: &'a TransportExecutor,
}

impl<'a> EndpointResolver<'a> {
    pub fn new(transport: &'a TransportExecutor) -> Self {
        Self { transport }
    }

    /// POST `body` to each candidate in order.
    ///
    /// A 404 advances to the next candidate; success or any other failure
    /// ends the walk. When every candidate answers 404 the result is
    /// [`ComposerApiError::ResolutionExhausted`].
    pub async fn try_in_order(
        &self,
        candidates: &[&str],
        body: &Value,
    ) -> Result<Value, ComposerApiError> {
        for candidate in candidates {
            let descriptor = RequestDescriptor::post(*candidate, body.clone());

            match CandidateOutcome::from(self.transport.execute(&descriptor).await) {
                CandidateOutcome::Success(value) => {
                    info!("Endpoint {candidate} accepted the request");
                    return Ok(value);
                }
                CandidateOutcome::NotFound => {
                    debug!("Endpoint {candidate} not found, trying next candidate");
                }
                CandidateOutcome::Failed(error) => return Err(error),
            }
        }

        Err(ComposerApiError::resolution_exhausted(candidates))
    }
}
