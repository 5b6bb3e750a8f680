use actix_web::{post, web};

use crate::api::{error, success};
use crate::modules::presign::model::{
    DownloadUrlRequest, DownloadUrlResponse, PresignedUrlsRequest, SignedUrlResult,
};
use crate::modules::presign::service::PresignService;
use crate::utils::ValidatedJson;

#[post("/generate-presigned-urls")]
pub async fn generate_presigned_urls(
    presign_service: web::Data<PresignService>,
    body: ValidatedJson<PresignedUrlsRequest>,
) -> Result<success::Success<Vec<SignedUrlResult>>, error::Error> {
    let urls = presign_service.issue_upload_urls(body.0.files).await?;
    Ok(success::Success::ok(urls))
}

#[post("/generate-download-url")]
pub async fn generate_download_url(
    presign_service: web::Data<PresignService>,
    body: ValidatedJson<DownloadUrlRequest>,
) -> Result<success::Success<DownloadUrlResponse>, error::Error> {
    let download = presign_service.issue_download_url(&body.0.file_url).await?;
    Ok(success::Success::ok(DownloadUrlResponse::from(download)))
}
