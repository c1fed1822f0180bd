//! Projects, membership, and versions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Per-project role.
///
/// Orthogonal to [`SystemRole`](crate::model::SystemRole): a regular user
/// can be admin of one project and doctor of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectRole {
    /// Project creator/owner — full project control.
    Admin,
    /// Project management and membership, no risk editing.
    Manager,
    /// Risk management only.
    Doctor,
}

impl ProjectRole {
    /// Wire name, as the backend serializes it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectRole::Admin => "admin",
            ProjectRole::Manager => "manager",
            ProjectRole::Doctor => "doctor",
        }
    }
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(ProjectRole::Admin),
            "manager" => Ok(ProjectRole::Manager),
            "doctor" => Ok(ProjectRole::Doctor),
            other => Err(Error::UnknownValue {
                kind: "project role",
                value: other.to_string(),
            }),
        }
    }
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    InProgress,
    Review,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Review => "review",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(ProjectStatus::Draft),
            "in_progress" => Ok(ProjectStatus::InProgress),
            "review" => Ok(ProjectStatus::Review),
            "completed" => Ok(ProjectStatus::Completed),
            "archived" => Ok(ProjectStatus::Archived),
            other => Err(Error::UnknownValue {
                kind: "project status",
                value: other.to_string(),
            }),
        }
    }
}

/// A member row as returned by `GET /api/projects/{id}/members`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMember {
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    pub role: ProjectRole,
    pub joined_at: DateTime<Utc>,
    pub user_email: String,
    pub user_first_name: String,
    pub user_last_name: String,
}

impl ProjectMember {
    /// Full display name of the member.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.user_first_name, self.user_last_name)
            .trim()
            .to_string()
    }
}

/// A tagged project version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectVersion {
    pub id: i64,
    pub project_id: i64,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_current: bool,
    pub created_at: DateTime<Utc>,
}

/// Full project detail, `GET /api/projects/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub progress_percentage: f64,

    // Medical device information
    pub device_name: String,
    #[serde(default)]
    pub device_model: Option<String>,
    #[serde(default)]
    pub device_purpose: Option<String>,
    #[serde(default)]
    pub device_description: Option<String>,
    #[serde(default)]
    pub device_classification: Option<String>,
    #[serde(default)]
    pub intended_use: Option<String>,
    #[serde(default)]
    pub user_profile: Option<String>,
    #[serde(default)]
    pub operating_environment: Option<String>,
    #[serde(default)]
    pub technical_specs: Option<String>,
    #[serde(default)]
    pub regulatory_requirements: Option<String>,
    #[serde(default)]
    pub standards: Option<String>,

    // Risk assessment parameters
    #[serde(default)]
    pub contact_type: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub invasiveness: Option<String>,
    #[serde(default)]
    pub energy_source: Option<String>,

    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub members: Vec<ProjectMember>,
    #[serde(default)]
    pub versions: Vec<ProjectVersion>,
}

impl Project {
    /// The caller's role in this project, if they are a member.
    pub fn role_of(&self, user_id: i64) -> Option<ProjectRole> {
        self.members
            .iter()
            .find(|m| m.user_id == user_id)
            .map(|m| m.role)
    }
}

/// Dashboard row, `GET /api/projects/`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSummary {
    pub id: i64,
    pub name: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub progress_percentage: f64,
    pub device_name: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub member_count: u32,
    /// The calling user's role in the project, when the server knows it.
    #[serde(default)]
    pub user_role: Option<ProjectRole>,
}

/// New project payload for `POST /api/projects/`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub device_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_classification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intended_use: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

impl ProjectDraft {
    /// Minimal draft: a name and a device name, everything else deferred.
    pub fn new(name: impl Into<String>, device_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            device_name: device_name.into(),
            device_model: None,
            device_purpose: None,
            device_classification: None,
            intended_use: None,
            status: None,
        }
    }
}

/// Partial project update, `PUT /api/projects/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_classification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intended_use: Option<String>,
}

/// Membership payload for `POST /api/projects/{id}/members`.
#[derive(Debug, Clone, Serialize)]
pub struct MemberDraft {
    pub user_id: i64,
    pub role: ProjectRole,
}

/// Version payload for `POST /api/projects/{id}/versions`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionDraft {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
