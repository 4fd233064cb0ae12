use async_trait::async_trait;
use reqwest::Client;

use crate::domain::errors::DomainError;
use crate::domain::models::major::MajorListing;
use crate::domain::repositories::major_directory_repository::MajorDirectoryRepository;
use crate::infrastructure::config::PortalConfig;
use crate::infrastructure::http_client::build_http_client;

/// Client for the third-party major-list directory.
pub struct HttpMajorDirectoryRepository {
    client: Client,
    majors_url: String,
}

impl HttpMajorDirectoryRepository {
    pub fn new(config: &PortalConfig) -> Result<Self, DomainError> {
        Ok(Self {
            client: build_http_client(config)?,
            majors_url: config.majors_url.clone(),
        })
    }
}

#[async_trait]
impl MajorDirectoryRepository for HttpMajorDirectoryRepository {
    async fn list_majors(&self) -> Result<Vec<MajorListing>, DomainError> {
        tracing::debug!("Fetching major list from {}", self.majors_url);

        let response = self
            .client
            .get(&self.majors_url)
            .send()
            .await
            .map_err(|error| {
                DomainError::UpstreamError(format!("Major directory fetch failed: {error}"))
            })?;

        if !response.status().is_success() {
            return Err(DomainError::UpstreamError(format!(
                "Major directory answered with status {}",
                response.status().as_u16()
            )));
        }

        let body = response.text().await.map_err(|error| {
            DomainError::UpstreamError(format!("Failed to read major list: {error}"))
        })?;
        serde_json::from_str(&body)
            .map_err(|error| DomainError::MalformedResponse(error.to_string()))
    }
}
