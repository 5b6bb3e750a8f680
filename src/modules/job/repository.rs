use uuid::Uuid;

use crate::api::error;
use crate::modules::job::schema::{JobRecord, JobStatus};

#[async_trait::async_trait]
pub trait JobRepository {
    async fn insert(&self, record: &JobRecord) -> Result<(), error::SystemError>;

    async fn update_status(
        &self,
        process_id: &Uuid,
        status: JobStatus,
    ) -> Result<(), error::SystemError>;
}
