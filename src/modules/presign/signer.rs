use std::time::Duration;

use crate::api::error;

/// Object-storage collaborator able to mint time-limited URLs.
#[async_trait::async_trait]
pub trait UrlSigner {
    /// Write-capable URL for `key`, bound to `content_type`.
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, error::SystemError>;

    /// Read-capable URL for `key`.
    async fn presign_download(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, error::SystemError>;
}
