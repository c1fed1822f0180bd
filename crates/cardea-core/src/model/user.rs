//! User accounts and system-wide roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::project::ProjectRole;

/// System-wide role, distinct from per-project roles.
///
/// New accounts come out of the identity handshake with no role at all;
/// an administrator assigns one afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemRole {
    /// System administrator: user/role administration, full changelog access.
    SysAdmin,
    /// Regular user.
    User,
}

impl SystemRole {
    /// Wire name, as the backend serializes it.
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemRole::SysAdmin => "SYS_ADMIN",
            SystemRole::User => "USER",
        }
    }
}

impl fmt::Display for SystemRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SystemRole {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SYS_ADMIN" => Ok(SystemRole::SysAdmin),
            "USER" => Ok(SystemRole::User),
            other => Err(crate::error::Error::UnknownValue {
                kind: "system role",
                value: other.to_string(),
            }),
        }
    }
}

/// A user account, as returned by `/api/auth/me` and `/api/users/*`.
///
/// `role` is `None` until an administrator assigns one; the guard treats
/// that state as authenticated-without-role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub role: Option<SystemRole>,
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub email_notifications: Option<bool>,
    #[serde(default)]
    pub browser_notifications: Option<bool>,
    #[serde(default)]
    pub mobile_notifications: Option<bool>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_language() -> String {
    "en".to_string()
}

impl User {
    /// Full display name.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }

    /// Whether a system role has been assigned yet.
    pub fn has_role(&self) -> bool {
        self.role.is_some()
    }
}

/// Partial profile update, sent as `PUT /api/users/{id}`.
///
/// `None` fields are omitted from the request body and left untouched by
/// the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<SystemRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_notifications: Option<bool>,
}

/// New account payload for `POST /api/users/` (admin only).
#[derive(Debug, Clone, Serialize)]
pub struct UserDraft {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<SystemRole>,
    pub language: String,
    pub is_active: bool,
}

/// A project a user belongs to, with their role in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProjectRef {
    pub id: i64,
    pub name: String,
    pub role: ProjectRole,
}

/// Row of `GET /api/users/with-projects` — the role-management listing.
#[derive(Debug, Clone, Deserialize)]
pub struct UserWithProjects {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub role: Option<SystemRole>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub projects: Vec<UserProjectRef>,
}

/// Aggregates for the account page, `GET /api/users/me/statistics`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserStatistics {
    #[serde(default)]
    pub projects_count: u64,
    #[serde(default)]
    pub risks_identified: u64,
    #[serde(default)]
    pub changes_made: u64,
}
