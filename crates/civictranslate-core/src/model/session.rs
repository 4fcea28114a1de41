// ── Session identity ──
//
// Two fixed profiles stand in for real authentication.

use serde::{Deserialize, Serialize};

/// Role granted by a login.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Client,
}

/// The logged-in user as shown in the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub role: Role,
    pub email: String,
    pub initials: String,
}

impl UserProfile {
    /// The fixed profile for a role.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self {
                name: "Sarah Mitchell".into(),
                role,
                email: "admin@civictranslate.gov".into(),
                initials: "SM".into(),
            },
            Role::Client => Self {
                name: "James Whitford".into(),
                role,
                email: "j.whitford@county.gov".into(),
                initials: "JW".into(),
            },
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
