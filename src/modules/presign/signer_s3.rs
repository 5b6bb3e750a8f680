use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use std::time::{Duration, Instant};

use crate::api::error;
use crate::modules::presign::signer::UrlSigner;

/// S3 implementation of [`UrlSigner`]; every key is signed against one bucket.
#[derive(Clone)]
pub struct S3UrlSigner {
    client: Client,
    bucket: String,
}

impl S3UrlSigner {
    pub fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    fn presigning_config(expires_in: Duration) -> Result<PresigningConfig, error::SystemError> {
        PresigningConfig::builder()
            .expires_in(expires_in)
            .build()
            .map_err(|e| error::SystemError::storage(e.to_string()))
    }
}

#[async_trait::async_trait]
impl UrlSigner for S3UrlSigner {
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, error::SystemError> {
        let start = Instant::now();
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(Self::presigning_config(expires_in)?)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %DisplayErrorContext(&e),
                    bucket = %self.bucket,
                    key = %key,
                    "S3 upload presign failed"
                );
                error::SystemError::storage(DisplayErrorContext(&e).to_string())
            })?;

        tracing::debug!(
            bucket = %self.bucket,
            key = %key,
            content_type = %content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload URL issued"
        );

        Ok(presigned.uri().to_string())
    }

    async fn presign_download(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, error::SystemError> {
        let start = Instant::now();
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(Self::presigning_config(expires_in)?)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %DisplayErrorContext(&e),
                    bucket = %self.bucket,
                    key = %key,
                    "S3 download presign failed"
                );
                error::SystemError::storage(DisplayErrorContext(&e).to_string())
            })?;

        tracing::debug!(
            bucket = %self.bucket,
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download URL issued"
        );

        Ok(presigned.uri().to_string())
    }
}
