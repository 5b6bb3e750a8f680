use crate::api::error;
use crate::modules::job::model::QueuePayload;

/// Message-queue collaborator.
#[async_trait::async_trait]
pub trait JobQueue {
    /// Durably enqueues `payload` and returns the broker-assigned message id.
    async fn enqueue(&self, payload: &QueuePayload) -> Result<String, error::SystemError>;
}
