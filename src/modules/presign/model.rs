use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FileDescriptor {
    #[validate(length(min = 1, message = "file_name cannot be empty"))]
    pub file_name: String,
    /// MIME type; guessed from the file name when sent blank.
    pub file_type: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PresignedUrlsRequest {
    #[validate(nested)]
    pub files: Vec<FileDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedUrlResult {
    pub original_name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub key: String,
    pub url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DownloadUrlRequest {
    pub file_url: String,
}

/// A read-capable signed URL for one object.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadUrl {
    pub key: String,
    pub url: String,
    pub expires_in: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DownloadUrlResponse {
    pub key: String,
    pub download_url: String,
    pub expires_in: u64,
}

impl From<DownloadUrl> for DownloadUrlResponse {
    fn from(value: DownloadUrl) -> Self {
        DownloadUrlResponse {
            key: value.key,
            download_url: value.url,
            expires_in: value.expires_in.as_secs(),
        }
    }
}
