use chrono::{SecondsFormat, Utc};
use log::{error, info};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::api::error;
use crate::modules::job::model::{JobRequest, QueueMessage, QueuePayload, SubmittedJob};
use crate::modules::job::queue::JobQueue;
use crate::modules::job::repository::JobRepository;
use crate::modules::job::schema::{JobRecord, JobStatus};
use crate::utils::with_timeout;

/// Turns chat requests into a durable job record plus one queued work message.
#[derive(Clone)]
pub struct JobService {
    queue: Arc<dyn JobQueue + Send + Sync>,
    repo: Arc<dyn JobRepository + Send + Sync>,
    call_timeout: Duration,
}

impl JobService {
    pub fn with_dependencies(
        queue: Arc<dyn JobQueue + Send + Sync>,
        repo: Arc<dyn JobRepository + Send + Sync>,
        call_timeout: Duration,
    ) -> Self {
        info!("JobService initialized with dependencies");
        JobService { queue, repo, call_timeout }
    }

    /// Records the job as `queued`, then enqueues its work message.
    ///
    /// The record is written first so a message on the queue always refers to
    /// a persisted `process_id`. If the enqueue fails the record is moved to
    /// `enqueue_failed` and the enqueue error is returned. Nothing is retried.
    pub async fn submit_job(&self, request: JobRequest) -> Result<SubmittedJob, error::SystemError> {
        let process_id = Uuid::new_v4();
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let message = QueueMessage {
            file_ids: request.file_ids.clone(),
            process_id,
            user_message: request.message.clone(),
            timestamp,
            num_slides: request.num_slides,
        };
        let payload = QueuePayload::file_processing(&message)?;

        let record = JobRecord {
            process_id,
            user_request: request.message,
            files: (!request.file_ids.is_empty()).then_some(request.file_ids),
            status: JobStatus::Queued,
            num_slides: request.num_slides,
            user_id: request.user_id,
        };

        with_timeout("insert job record", self.call_timeout, self.repo.insert(&record)).await?;

        match with_timeout("enqueue job message", self.call_timeout, self.queue.enqueue(&payload))
            .await
        {
            Ok(message_id) => {
                info!("Job {} queued as message {}", process_id, message_id);
            }
            Err(enqueue_err) => {
                error!("Enqueue failed for job {}: {}", process_id, enqueue_err);
                let marked = with_timeout(
                    "mark job enqueue_failed",
                    self.call_timeout,
                    self.repo.update_status(&process_id, JobStatus::EnqueueFailed),
                )
                .await;
                if let Err(mark_err) = marked {
                    error!("Job {} left as queued without a message: {}", process_id, mark_err);
                }
                return Err(enqueue_err);
            }
        }

        Ok(SubmittedJob { process_id, status: JobStatus::Queued })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{FakeJobRepository, FakeQueue};

    fn request(file_ids: &[&str], num_slides: i32) -> JobRequest {
        JobRequest {
            message: "summarize these".to_string(),
            file_ids: file_ids.iter().map(|s| s.to_string()).collect(),
            num_slides,
            user_id: "u1".to_string(),
        }
    }

    fn service(queue: Arc<FakeQueue>, repo: Arc<FakeJobRepository>) -> JobService {
        JobService::with_dependencies(queue, repo, Duration::from_secs(5))
    }

    #[actix_web::test]
    async fn test_submit_job_records_and_enqueues() {
        let queue = Arc::new(FakeQueue::default());
        let repo = Arc::new(FakeJobRepository::default());

        let job = service(queue.clone(), repo.clone())
            .submit_job(request(&["a.pdf", "b.pdf"], 10))
            .await
            .unwrap();
        assert_eq!(job.status, JobStatus::Queued);

        let messages = queue.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].process_id, job.process_id);
        assert_eq!(messages[0].file_ids, ["a.pdf", "b.pdf"]);
        assert_eq!(messages[0].num_slides, 10);
        assert_eq!(messages[0].user_message, "summarize these");
        assert_eq!(queue.message_types(), ["file_processing"]);

        let records = repo.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].process_id, job.process_id);
        assert_eq!(records[0].status, JobStatus::Queued);
        assert_eq!(records[0].user_id, "u1");
        assert_eq!(records[0].files.as_deref(), Some(&["a.pdf".to_string(), "b.pdf".to_string()][..]));
    }

    #[actix_web::test]
    async fn test_process_ids_are_fresh_per_call() {
        let queue = Arc::new(FakeQueue::default());
        let repo = Arc::new(FakeJobRepository::default());
        let svc = service(queue, repo);

        let first = svc.submit_job(request(&["a.pdf"], 15)).await.unwrap();
        let second = svc.submit_job(request(&["a.pdf"], 15)).await.unwrap();

        assert_ne!(first.process_id, second.process_id);
        assert_eq!(first.process_id.get_version_num(), 4);
    }

    #[actix_web::test]
    async fn test_timestamp_is_utc_iso8601() {
        let queue = Arc::new(FakeQueue::default());
        let repo = Arc::new(FakeJobRepository::default());
        service(queue.clone(), repo).submit_job(request(&["a.pdf"], 15)).await.unwrap();

        let timestamp = &queue.messages()[0].timestamp;
        assert!(timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[actix_web::test]
    async fn test_no_files_stores_null_files() {
        let queue = Arc::new(FakeQueue::default());
        let repo = Arc::new(FakeJobRepository::default());
        service(queue.clone(), repo.clone()).submit_job(request(&[], 15)).await.unwrap();

        assert_eq!(repo.records()[0].files, None);
        assert!(queue.messages()[0].file_ids.is_empty());
    }

    #[actix_web::test]
    async fn test_persist_failure_enqueues_nothing() {
        let queue = Arc::new(FakeQueue::default());
        let repo = Arc::new(FakeJobRepository::failing_insert());

        let err = service(queue.clone(), repo).submit_job(request(&["a.pdf"], 15)).await.unwrap_err();

        assert!(matches!(err, error::SystemError::DatabaseError(_)));
        assert!(queue.messages().is_empty());
    }

    #[actix_web::test]
    async fn test_enqueue_failure_marks_record() {
        let queue = Arc::new(FakeQueue::failing());
        let repo = Arc::new(FakeJobRepository::default());

        let err = service(queue, repo.clone()).submit_job(request(&["a.pdf"], 15)).await.unwrap_err();

        assert!(matches!(err, error::SystemError::QueueError(_)));
        let records = repo.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, JobStatus::EnqueueFailed);
    }

    #[actix_web::test]
    async fn test_enqueue_failure_surfaces_even_if_marking_fails() {
        let queue = Arc::new(FakeQueue::failing());
        let repo = Arc::new(FakeJobRepository::failing_update());

        let err = service(queue, repo.clone()).submit_job(request(&["a.pdf"], 15)).await.unwrap_err();

        assert!(matches!(err, error::SystemError::QueueError(_)));
        assert_eq!(repo.records()[0].status, JobStatus::Queued);
    }

    #[actix_web::test]
    async fn test_slow_queue_times_out() {
        let queue = Arc::new(FakeQueue::stalled(Duration::from_secs(30)));
        let repo = Arc::new(FakeJobRepository::default());
        let svc = JobService::with_dependencies(queue, repo.clone(), Duration::from_millis(20));

        let err = svc.submit_job(request(&["a.pdf"], 15)).await.unwrap_err();

        assert!(matches!(err, error::SystemError::Timeout { operation: "enqueue job message", .. }));
        assert_eq!(repo.records()[0].status, JobStatus::EnqueueFailed);
    }
}
