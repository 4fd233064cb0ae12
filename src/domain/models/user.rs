use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Server-of-record user entity. The client holds a transient copy;
/// edits are staged locally and only become durable after a successful
/// PATCH round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInformationDetail {
    /// Immutable identity, never written by the client.
    pub pk: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub attributes: UserAttributeDefinition,
    #[serde(default)]
    pub groups_info: Vec<GroupBrief>,
}

/// Mutable sub-record of a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAttributeDefinition {
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub expected_grad: Option<String>,
    /// Team pk mapped to the user's role title on that team.
    #[serde(default)]
    pub roles: HashMap<String, String>,
    /// Storage key of the uploaded avatar, if any.
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBrief {
    pub pk: String,
    pub name: String,
}

/// Staged profile edits. `None` fields are omitted from the PATCH body
/// and mean "no change".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_grad: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.major.is_none()
            && self.phone_number.is_none()
            && self.expected_grad.is_none()
            && self.avatar.is_none()
    }
}

impl UserInformationDetail {
    /// Record adopted locally after the server acknowledges a save:
    /// staged fields overwrite their counterparts, everything else is
    /// carried over untouched. Identity fields are never rewritten.
    pub fn merged_with(&self, staged: &ProfileUpdate) -> UserInformationDetail {
        let mut merged = self.clone();
        if let Some(major) = &staged.major {
            merged.attributes.major = Some(major.clone());
        }
        if let Some(phone_number) = &staged.phone_number {
            merged.attributes.phone_number = Some(phone_number.clone());
        }
        if let Some(expected_grad) = &staged.expected_grad {
            merged.attributes.expected_grad = Some(expected_grad.clone());
        }
        if let Some(avatar) = &staged.avatar {
            merged.attributes.avatar = Some(avatar.clone());
        }
        merged
    }
}
