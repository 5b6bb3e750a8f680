use log::info;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::api::error;
use crate::modules::presign::model::{DownloadUrl, FileDescriptor, SignedUrlResult};
use crate::modules::presign::signer::UrlSigner;
use crate::utils::with_timeout;

#[derive(Clone)]
pub struct PresignService {
    signer: Arc<dyn UrlSigner + Send + Sync>,
    expires_in: Duration,
    call_timeout: Duration,
}

impl PresignService {
    pub fn with_dependencies(
        signer: Arc<dyn UrlSigner + Send + Sync>,
        expires_in: Duration,
        call_timeout: Duration,
    ) -> Self {
        info!("PresignService initialized with {}s URL expiry", expires_in.as_secs());
        PresignService { signer, expires_in, call_timeout }
    }

    /// Signs one upload URL per descriptor, preserving input order.
    ///
    /// The object key is the caller's file name verbatim. A single signing
    /// failure fails the whole batch.
    pub async fn issue_upload_urls(
        &self,
        files: Vec<FileDescriptor>,
    ) -> Result<Vec<SignedUrlResult>, error::SystemError> {
        let mut results = Vec::with_capacity(files.len());

        for file in files {
            if file.file_name.is_empty() {
                return Err(error::SystemError::bad_request("file_name cannot be empty"));
            }

            let content_type = resolve_content_type(&file);
            let key = file.file_name.clone();
            let url = with_timeout(
                "sign upload URL",
                self.call_timeout,
                self.signer.presign_upload(&key, &content_type, self.expires_in),
            )
            .await?;

            results.push(SignedUrlResult { original_name: file.file_name, content_type, key, url });
        }

        info!("Issued {} upload URL(s)", results.len());
        Ok(results)
    }

    pub async fn issue_download_url(&self, file_ref: &str) -> Result<DownloadUrl, error::SystemError> {
        let key = extract_key(file_ref)?;
        let url = with_timeout(
            "sign download URL",
            self.call_timeout,
            self.signer.presign_download(&key, self.expires_in),
        )
        .await?;

        Ok(DownloadUrl { key, url, expires_in: self.expires_in })
    }
}

fn resolve_content_type(file: &FileDescriptor) -> String {
    let declared = file.file_type.trim();
    if declared.is_empty() {
        mime_guess::from_path(&file.file_name).first_or_octet_stream().essence_str().to_string()
    } else {
        declared.to_string()
    }
}

/// Resolves a storage key from either a bare key or an absolute object URL.
///
/// For URLs with a scheme and host the key is the percent-decoded path without
/// its leading slash; anything else is taken as the key itself, trimmed.
pub fn extract_key(file_ref: &str) -> Result<String, error::SystemError> {
    let trimmed = file_ref.trim();

    let key = match Url::parse(trimmed) {
        Ok(url) if url.host_str().is_some_and(|host| !host.is_empty()) => {
            let path = url.path();
            let path = path.strip_prefix('/').unwrap_or(path);
            urlencoding::decode(path).map(|p| p.into_owned()).unwrap_or_else(|_| path.to_string())
        }
        _ => trimmed.to_string(),
    };

    if key.is_empty() {
        return Err(error::SystemError::bad_request(
            "file_url does not contain an object key",
        ));
    }

    Ok(key)
}
