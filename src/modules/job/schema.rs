use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    /// Terminal: the record was written but the queue refused the message.
    EnqueueFailed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::EnqueueFailed => "enqueue_failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row written to the process table once per submitted job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub process_id: Uuid,
    pub user_request: String,
    pub files: Option<Vec<String>>,
    pub status: JobStatus,
    pub num_slides: i32,
    pub user_id: String,
}
