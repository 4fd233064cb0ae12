use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::models::avatar::UploadTarget;

/// Direct upload to the storage provider named by an `UploadTarget`.
#[async_trait]
pub trait ObjectStorageRepository: Send + Sync {
    /// POST a multipart form to `target.upload_url`: every provider
    /// field first, verbatim, then the file content under the `file`
    /// field. Success is judged on HTTP status alone; no response body
    /// shape is assumed.
    async fn upload(
        &self,
        target: &UploadTarget,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), DomainError>;
}
