use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome of one payment verification poll
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Success,
    Pending,
}

/// External collaborator that checks whether the payment has landed.
/// A call may fail transiently; callers retry on the next poll.
#[async_trait]
pub trait VerificationClient: Send + Sync {
    async fn verify(
        &self,
    ) -> Result<VerificationStatus, Box<dyn std::error::Error + Send + Sync>>;
}
