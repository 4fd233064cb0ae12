//! Pure view-model assembly: joins the user's role map against the
//! separately fetched team directory. No caching, no retries; callers
//! re-fetch both collections on every page load.

use std::collections::HashMap;

use crate::application::dto::profile_dto::ProfileViewDto;
use crate::domain::models::team::{RoleEntry, TeamInformationBrief};
use crate::domain::models::user::UserInformationDetail;

/// Key a memberships response by team pk for the role join.
pub fn team_lookup(
    teams: Vec<TeamInformationBrief>,
) -> HashMap<String, TeamInformationBrief> {
    teams
        .into_iter()
        .map(|team| (team.pk.clone(), team))
        .collect()
}

/// Join role titles with team metadata. Roles naming a team the lookup
/// does not contain are dropped, not errored: before the membership
/// fetch resolves the map is simply empty and the join yields nothing.
pub fn build_role_entries(
    roles: &HashMap<String, String>,
    teams: &HashMap<String, TeamInformationBrief>,
) -> Vec<RoleEntry> {
    let mut entries: Vec<RoleEntry> = roles
        .iter()
        .filter_map(|(team_pk, role_title)| {
            teams.get(team_pk).map(|team| RoleEntry {
                team_pk: team_pk.clone(),
                role_title: role_title.clone(),
                team_info: team.clone(),
            })
        })
        .collect();

    // Stable display order regardless of map iteration.
    entries.sort_by(|a, b| a.team_info.name.cmp(&b.team_info.name));
    entries
}

pub fn build_profile_view(
    user: &UserInformationDetail,
    teams: &HashMap<String, TeamInformationBrief>,
) -> ProfileViewDto {
    let role_entries = build_role_entries(&user.attributes.roles, teams);
    ProfileViewDto::from_user(user, role_entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(pk: &str, name: &str) -> TeamInformationBrief {
        TeamInformationBrief {
            pk: pk.to_string(),
            name: name.to_string(),
            description: None,
            logo: None,
        }
    }

    #[test]
    fn unresolvable_roles_are_dropped_silently() {
        let roles = HashMap::from([("t1".to_string(), "Lead".to_string())]);
        let teams = team_lookup(vec![team("t2", "Web Dev")]);

        let entries = build_role_entries(&roles, &teams);
        assert!(entries.is_empty());
    }

    #[test]
    fn resolvable_roles_join_team_metadata() {
        let roles = HashMap::from([
            ("t1".to_string(), "Lead".to_string()),
            ("t2".to_string(), "Member".to_string()),
        ]);
        let teams = team_lookup(vec![team("t2", "Web Dev"), team("t1", "App Dev")]);

        let entries = build_role_entries(&roles, &teams);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].team_info.name, "App Dev");
        assert_eq!(entries[0].role_title, "Lead");
        assert_eq!(entries[1].team_info.name, "Web Dev");
    }

    #[test]
    fn empty_lookup_yields_zero_entries() {
        let roles = HashMap::from([("t1".to_string(), "Lead".to_string())]);
        let entries = build_role_entries(&roles, &HashMap::new());
        assert!(entries.is_empty());
    }
}
