use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::domain::errors::DomainError;
use crate::domain::models::avatar::UploadTarget;
use crate::domain::repositories::object_storage_repository::ObjectStorageRepository;
use crate::infrastructure::config::PortalConfig;
use crate::infrastructure::http_client::build_upload_client;

/// Field name the storage provider expects the file content under.
const FILE_FIELD: &str = "file";

/// Direct multipart uploader for pre-signed storage targets.
pub struct HttpObjectStorageRepository {
    client: Client,
}

impl HttpObjectStorageRepository {
    pub fn new(config: &PortalConfig) -> Result<Self, DomainError> {
        Ok(Self {
            client: build_upload_client(config)?,
        })
    }
}

#[async_trait]
impl ObjectStorageRepository for HttpObjectStorageRepository {
    async fn upload(
        &self,
        target: &UploadTarget,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), DomainError> {
        tracing::debug!(
            "Uploading {} byte(s) to storage for key {}",
            bytes.len(),
            target.key
        );

        // Provider fields go in first, untouched; the file part is last.
        let mut form = Form::new();
        for (name, value) in &target.fields {
            form = form.text(name.clone(), value.clone());
        }
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|error| {
                DomainError::InternalError(format!("Invalid upload content type: {error}"))
            })?;
        form = form.part(FILE_FIELD, part);

        let response = self
            .client
            .post(&target.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|error| DomainError::UpstreamError(format!("Upload failed: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::UpstreamError(format!(
                "Storage provider answered with status {}",
                status.as_u16()
            )));
        }

        tracing::info!("Avatar uploaded for key {}", target.key);
        Ok(())
    }
}
