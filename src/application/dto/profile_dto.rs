use serde::{Deserialize, Serialize};

use crate::domain::models::team::RoleEntry;
use crate::domain::models::user::{ProfileUpdate, UserInformationDetail};
use crate::domain::validation::display_initials;

/// Display-ready profile assembled from the user record and the team
/// directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileViewDto {
    pub pk: String,
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    /// Fallback badge text when no avatar is set.
    pub initials: String,
    pub major: Option<String>,
    pub phone_number: Option<String>,
    pub expected_grad: Option<String>,
    pub avatar: Option<String>,
    pub role_entries: Vec<RoleEntryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleEntryDto {
    pub team_pk: String,
    pub role_title: String,
    pub team_name: String,
    pub team_logo: Option<String>,
}

/// Form fields staged in the edit dialog. Unset fields mean "no change".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    pub major: Option<String>,
    pub phone_number: Option<String>,
    pub expected_grad: Option<String>,
    pub avatar: Option<String>,
}

impl From<UpdateProfileDto> for ProfileUpdate {
    fn from(dto: UpdateProfileDto) -> Self {
        ProfileUpdate {
            major: dto.major,
            phone_number: dto.phone_number,
            expected_grad: dto.expected_grad,
            avatar: dto.avatar,
        }
    }
}

impl From<RoleEntry> for RoleEntryDto {
    fn from(entry: RoleEntry) -> Self {
        Self {
            team_pk: entry.team_pk,
            role_title: entry.role_title,
            team_name: entry.team_info.name,
            team_logo: entry.team_info.logo,
        }
    }
}

impl ProfileViewDto {
    pub fn from_user(user: &UserInformationDetail, role_entries: Vec<RoleEntry>) -> Self {
        let badge_source = user
            .display_name
            .clone()
            .unwrap_or_else(|| user.username.clone());
        Self {
            pk: user.pk.clone(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            initials: display_initials(&badge_source),
            major: user.attributes.major.clone(),
            phone_number: user.attributes.phone_number.clone(),
            expected_grad: user.attributes.expected_grad.clone(),
            avatar: user.attributes.avatar.clone(),
            role_entries: role_entries.into_iter().map(RoleEntryDto::from).collect(),
        }
    }
}
