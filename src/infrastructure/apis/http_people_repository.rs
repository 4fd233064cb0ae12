use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::errors::DomainError;
use crate::domain::models::avatar::UploadTarget;
use crate::domain::models::team::TeamInformationBrief;
use crate::domain::models::user::{ProfileUpdate, UserInformationDetail};
use crate::domain::repositories::people_repository::PeopleRepository;
use crate::infrastructure::config::PortalConfig;
use crate::infrastructure::http_client::build_http_client;

/// reqwest-backed client for the org people API.
pub struct HttpPeopleRepository {
    client: Client,
    base_url: String,
    session_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MembershipsResponse {
    #[serde(default)]
    teams: Vec<TeamInformationBrief>,
}

impl HttpPeopleRepository {
    pub fn new(config: &PortalConfig) -> Result<Self, DomainError> {
        Ok(Self {
            client: build_http_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_token: config.session_token.clone(),
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_session_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session_token {
            Some(token) if !token.trim().is_empty() => {
                request.header(AUTHORIZATION, format!("Bearer {token}"))
            }
            _ => request,
        }
    }

    /// Parse a success body against its schema, or fail typed instead of
    /// trusting the shape.
    async fn parse_body<T: DeserializeOwned>(response: Response) -> Result<T, DomainError> {
        let body = response.text().await.map_err(|error| {
            DomainError::UpstreamError(format!("Failed to read response body: {error}"))
        })?;
        serde_json::from_str(&body)
            .map_err(|error| DomainError::MalformedResponse(error.to_string()))
    }

    async fn map_error_response(response: Response, default_message: &str) -> DomainError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body, default_message);

        match status {
            StatusCode::NOT_FOUND => DomainError::NotFound(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                DomainError::UpstreamError(format!("Not allowed: {message}"))
            }
            StatusCode::BAD_REQUEST => DomainError::InvalidData(message),
            _ => DomainError::UpstreamError(format!(
                "People API failed with status {}: {message}",
                status.as_u16()
            )),
        }
    }
}

#[async_trait]
impl PeopleRepository for HttpPeopleRepository {
    async fn get_user(&self, pk: &str) -> Result<UserInformationDetail, DomainError> {
        tracing::debug!("Fetching user {}", pk);

        let url = self.build_url(&format!("/api/org/people/{pk}"));
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|error| DomainError::UpstreamError(format!("User fetch failed: {error}")))?;

        if !response.status().is_success() {
            return Err(Self::map_error_response(response, "Failed to fetch user").await);
        }

        Self::parse_body(response).await
    }

    async fn get_memberships(
        &self,
        username: &str,
    ) -> Result<Vec<TeamInformationBrief>, DomainError> {
        tracing::debug!("Fetching memberships for {}", username);

        let url = self.build_url(&format!("/api/org/people/{username}/memberof"));
        let response = self
            .apply_session_auth(self.client.get(url))
            .send()
            .await
            .map_err(|error| {
                DomainError::UpstreamError(format!("Membership fetch failed: {error}"))
            })?;

        if !response.status().is_success() {
            return Err(Self::map_error_response(response, "Failed to fetch memberships").await);
        }

        let memberships: MembershipsResponse = Self::parse_body(response).await?;
        Ok(memberships.teams)
    }

    async fn request_avatar_upload_url(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadTarget, DomainError> {
        tracing::debug!("Requesting avatar upload URL for {}", file_name);

        let url = self.build_url("/api/org/people/avatar/self/upload-url");
        let response = self
            .apply_session_auth(self.client.get(url))
            .query(&[("fileName", file_name), ("contentType", content_type)])
            .send()
            .await
            .map_err(|error| {
                DomainError::UpstreamError(format!("Upload URL request failed: {error}"))
            })?;

        if !response.status().is_success() {
            return Err(Self::map_error_response(response, "Failed to get upload URL").await);
        }

        Self::parse_body(response).await
    }

    async fn update_profile(
        &self,
        pk: &str,
        update: &ProfileUpdate,
    ) -> Result<UserInformationDetail, DomainError> {
        tracing::debug!("Saving profile for {}", pk);

        let url = self.build_url(&format!("/api/org/people/{pk}"));
        let response = self
            .apply_session_auth(self.client.patch(url))
            .json(update)
            .send()
            .await
            .map_err(|error| DomainError::UpstreamError(format!("Profile save failed: {error}")))?;

        if !response.status().is_success() {
            return Err(Self::map_error_response(response, "Failed to save profile").await);
        }

        Self::parse_body(response).await
    }
}

fn extract_error_message(body: &str, default_message: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return default_message.to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            return message.to_string();
        }
    }

    body.to_string()
}
