use actix_web::{post, web};

use crate::api::{error, success};
use crate::modules::job::model::{ChatResponse, JobRequest};
use crate::modules::job::service::JobService;
use crate::utils::ValidatedJson;

#[post("/chat")]
pub async fn chat(
    job_service: web::Data<JobService>,
    body: ValidatedJson<JobRequest>,
) -> Result<success::Success<ChatResponse>, error::Error> {
    let request = body.0;
    let response = request.acknowledgement();
    let job = job_service.submit_job(request).await?;

    Ok(success::Success::ok(ChatResponse {
        response,
        process_id: job.process_id,
        processing_status: job.status,
    }))
}
