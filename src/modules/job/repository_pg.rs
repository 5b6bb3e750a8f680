use uuid::Uuid;

use crate::api::error;
use crate::modules::job::{
    repository::JobRepository,
    schema::{JobRecord, JobStatus},
};

#[derive(Clone)]
pub struct JobRepositoryPg {
    pool: sqlx::PgPool,
    insert_sql: String,
    update_status_sql: String,
}

impl JobRepositoryPg {
    /// `table` must already be validated as a plain identifier.
    pub fn new(pool: sqlx::PgPool, table: &str) -> Self {
        let insert_sql = format!(
            r#"
            INSERT INTO "{table}" (process_id, user_request, files, status, num_slides, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#
        );
        let update_status_sql = format!(
            r#"
            UPDATE "{table}" SET status = $1 WHERE process_id = $2
            "#
        );
        Self { pool, insert_sql, update_status_sql }
    }
}

#[async_trait::async_trait]
impl JobRepository for JobRepositoryPg {
    async fn insert(&self, record: &JobRecord) -> Result<(), error::SystemError> {
        sqlx::query(&self.insert_sql)
            .bind(record.process_id)
            .bind(&record.user_request)
            .bind(record.files.as_deref())
            .bind(record.status.as_str())
            .bind(record.num_slides)
            .bind(&record.user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_status(
        &self,
        process_id: &Uuid,
        status: JobStatus,
    ) -> Result<(), error::SystemError> {
        let result = sqlx::query(&self.update_status_sql)
            .bind(status.as_str())
            .bind(process_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(error::SystemError::database(format!("process {process_id} not found")));
        }

        Ok(())
    }
}
