use serde::{Deserialize, Serialize};

/// Team entity as returned by the memberships endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInformationBrief {
    pub pk: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Display tuple joining a user's team-scoped role title with that
/// team's metadata. Only produced when the team resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleEntry {
    pub team_pk: String,
    pub role_title: String,
    pub team_info: TeamInformationBrief,
}
