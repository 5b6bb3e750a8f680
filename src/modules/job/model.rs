use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::error;
use crate::constants::{DEFAULT_NUM_SLIDES, FILE_PROCESSING_MESSAGE_TYPE};
use crate::modules::job::schema::JobStatus;

fn default_num_slides() -> i32 {
    DEFAULT_NUM_SLIDES
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JobRequest {
    pub message: String,
    /// Storage keys from a previous upload; not checked for existence.
    #[serde(default)]
    pub file_ids: Vec<String>,
    #[serde(default = "default_num_slides")]
    #[validate(range(min = 1, message = "num_slides must be at least 1"))]
    pub num_slides: i32,
    #[validate(length(min = 1, message = "user_id cannot be empty"))]
    pub user_id: String,
}

impl JobRequest {
    pub fn acknowledgement(&self) -> String {
        let mut text = format!("I received your message: '{}'.", self.message);
        if !self.file_ids.is_empty() {
            text.push_str(&format!(
                " Processing {} file(s) in the background...",
                self.file_ids.len()
            ));
        }
        text
    }
}

/// Work item consumed by the downstream file-processing worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueMessage {
    pub file_ids: Vec<String>,
    pub process_id: Uuid,
    pub user_message: String,
    pub timestamp: String,
    pub num_slides: i32,
}

/// A [`QueueMessage`] in its wire form: JSON text plus the classification
/// attribute consumers filter on.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuePayload {
    pub body: String,
    pub message_type: &'static str,
}

impl QueuePayload {
    pub fn file_processing(message: &QueueMessage) -> Result<Self, error::SystemError> {
        Ok(QueuePayload {
            body: serde_json::to_string(message)?,
            message_type: FILE_PROCESSING_MESSAGE_TYPE,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedJob {
    pub process_id: Uuid,
    pub status: JobStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub process_id: Uuid,
    pub processing_status: JobStatus,
}
