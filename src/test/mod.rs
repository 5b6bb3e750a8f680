//! In-memory collaborators for unit and handler tests.

use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

use crate::api::error;
use crate::modules::job::{
    model::{QueueMessage, QueuePayload},
    queue::JobQueue,
    repository::JobRepository,
    schema::{JobRecord, JobStatus},
};
use crate::modules::presign::signer::UrlSigner;

/// Signs deterministic fake URLs; optionally fails for one key.
#[derive(Default)]
pub struct FakeSigner {
    fail_on: Option<String>,
    uploads: Mutex<Vec<(String, String, u64)>>,
    downloads: Mutex<Vec<String>>,
}

impl FakeSigner {
    pub fn failing_on(key: &str) -> Self {
        Self { fail_on: Some(key.to_string()), ..Default::default() }
    }

    pub fn upload_calls(&self) -> Vec<(String, String, u64)> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn download_calls(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }

    fn check(&self, key: &str) -> Result<(), error::SystemError> {
        match &self.fail_on {
            Some(bad) if bad == key => {
                Err(error::SystemError::storage(format!("signing denied for {key}")))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl UrlSigner for FakeSigner {
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, error::SystemError> {
        self.check(key)?;
        self.uploads.lock().unwrap().push((
            key.to_string(),
            content_type.to_string(),
            expires_in.as_secs(),
        ));
        Ok(format!("https://storage.test/{key}?op=put&expires={}", expires_in.as_secs()))
    }

    async fn presign_download(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, error::SystemError> {
        self.check(key)?;
        self.downloads.lock().unwrap().push(key.to_string());
        Ok(format!("https://storage.test/{key}?op=get&expires={}", expires_in.as_secs()))
    }
}

/// Queue that keeps every accepted payload.
#[derive(Default)]
pub struct FakeQueue {
    fail: bool,
    delay: Option<Duration>,
    sent: Mutex<Vec<QueuePayload>>,
}

impl FakeQueue {
    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    pub fn stalled(delay: Duration) -> Self {
        Self { delay: Some(delay), ..Default::default() }
    }

    /// Accepted bodies decoded back into messages.
    pub fn messages(&self) -> Vec<QueueMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|payload| serde_json::from_str(&payload.body).unwrap())
            .collect()
    }

    pub fn message_types(&self) -> Vec<&'static str> {
        self.sent.lock().unwrap().iter().map(|payload| payload.message_type).collect()
    }
}

#[async_trait::async_trait]
impl JobQueue for FakeQueue {
    async fn enqueue(&self, payload: &QueuePayload) -> Result<String, error::SystemError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(error::SystemError::queue("queue unavailable"));
        }
        self.sent.lock().unwrap().push(payload.clone());
        Ok(Uuid::new_v4().to_string())
    }
}

/// Store that keeps records in insertion order.
#[derive(Default)]
pub struct FakeJobRepository {
    fail_insert: bool,
    fail_update: bool,
    records: Mutex<Vec<JobRecord>>,
}

impl FakeJobRepository {
    pub fn failing_insert() -> Self {
        Self { fail_insert: true, ..Default::default() }
    }

    pub fn failing_update() -> Self {
        Self { fail_update: true, ..Default::default() }
    }

    pub fn records(&self) -> Vec<JobRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl JobRepository for FakeJobRepository {
    async fn insert(&self, record: &JobRecord) -> Result<(), error::SystemError> {
        if self.fail_insert {
            return Err(error::SystemError::database("connection refused"));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        process_id: &Uuid,
        status: JobStatus,
    ) -> Result<(), error::SystemError> {
        if self.fail_update {
            return Err(error::SystemError::database("connection reset"));
        }
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.process_id == *process_id) {
            Some(record) => {
                record.status = status;
                Ok(())
            }
            None => Err(error::SystemError::database(format!("process {process_id} not found"))),
        }
    }
}
