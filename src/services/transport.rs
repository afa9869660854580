use async_trait::async_trait;

use crate::error::LeadError;
use crate::models::payload::SubmissionPayload;

/// Delivers a built payload to the remote waitlist API.
///
/// The endpoint is chosen from the payload itself. Implementations make
/// exactly one attempt and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadTransport: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), LeadError>;
}
