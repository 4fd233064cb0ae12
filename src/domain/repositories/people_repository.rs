use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::models::avatar::UploadTarget;
use crate::domain::models::team::TeamInformationBrief;
use crate::domain::models::user::{ProfileUpdate, UserInformationDetail};

/// Client interface to the org people API.
#[async_trait]
pub trait PeopleRepository: Send + Sync {
    /// Fetch a user record by primary key.
    async fn get_user(&self, pk: &str) -> Result<UserInformationDetail, DomainError>;

    /// Fetch the teams a user belongs to. Credentialed request.
    async fn get_memberships(
        &self,
        username: &str,
    ) -> Result<Vec<TeamInformationBrief>, DomainError>;

    /// Ask the backend for a short-lived upload destination for the
    /// signed-in user's avatar.
    async fn request_avatar_upload_url(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadTarget, DomainError>;

    /// PATCH staged profile fields; omitted fields are left unchanged.
    async fn update_profile(
        &self,
        pk: &str,
        update: &ProfileUpdate,
    ) -> Result<UserInformationDetail, DomainError>;
}
