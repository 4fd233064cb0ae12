use std::collections::HashMap;
use std::sync::Arc;

use crate::application::dto::profile_dto::{ProfileViewDto, UpdateProfileDto};
use crate::application::errors::ApplicationError;
use crate::application::services::profile_view_builder::{build_profile_view, team_lookup};
use crate::domain::models::team::TeamInformationBrief;
use crate::domain::models::user::{ProfileUpdate, UserInformationDetail};
use crate::domain::repositories::people_repository::PeopleRepository;

/// Loads profile data and runs the edit-dialog save transaction.
pub struct ProfileService {
    people_repository: Arc<dyn PeopleRepository>,
}

impl ProfileService {
    pub fn new(people_repository: Arc<dyn PeopleRepository>) -> Self {
        Self { people_repository }
    }

    pub async fn load_profile(&self, pk: &str) -> Result<UserInformationDetail, ApplicationError> {
        tracing::info!("Loading profile for {}", pk);

        let user = self.people_repository.get_user(pk).await?;
        Ok(user)
    }

    /// Fetch the team directory and key it by pk for the role join. The
    /// user fetch and this fetch are independent; callers may render an
    /// empty membership list until this one resolves.
    pub async fn load_team_lookup(
        &self,
        username: &str,
    ) -> Result<HashMap<String, TeamInformationBrief>, ApplicationError> {
        tracing::info!("Loading memberships for {}", username);

        let teams = self.people_repository.get_memberships(username).await?;
        Ok(team_lookup(teams))
    }

    pub fn build_view(
        &self,
        user: &UserInformationDetail,
        teams: &HashMap<String, TeamInformationBrief>,
    ) -> ProfileViewDto {
        build_profile_view(user, teams)
    }

    /// Save staged edits in a single PATCH. On success the returned
    /// record is the previous one with the staged fields applied, ready
    /// to replace the local copy. On failure the caller keeps its staged
    /// values; nothing local is touched here.
    pub async fn save_profile(
        &self,
        current: &UserInformationDetail,
        staged: UpdateProfileDto,
    ) -> Result<UserInformationDetail, ApplicationError> {
        let update = ProfileUpdate::from(staged);
        if update.is_empty() {
            tracing::debug!("No staged changes for {}; skipping PATCH", current.pk);
            return Ok(current.clone());
        }

        tracing::info!("Saving profile for {}", current.pk);
        let acknowledged = self
            .people_repository
            .update_profile(&current.pk, &update)
            .await?;

        // The server's record is authoritative, but identity fields stay
        // the ones we already had; staged values win over a lagging echo.
        let mut merged = acknowledged.merged_with(&update);
        merged.pk = current.pk.clone();
        merged.username = current.username.clone();
        Ok(merged)
    }
}
