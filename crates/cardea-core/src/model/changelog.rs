//! The audit changelog: server-owned, append-only, read-only here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Action recorded by a changelog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    // Project actions
    ProjectCreated,
    ProjectUpdated,
    ProjectDeleted,
    ProjectStatusChanged,
    // User actions
    UserAdded,
    UserRemoved,
    UserRoleChanged,
    UserProfileUpdated,
    // Risk analysis actions
    RiskCreated,
    RiskUpdated,
    RiskDeleted,
    RiskStatusChanged,
    // Project member actions
    ProjectMemberAdded,
    ProjectMemberRemoved,
    ProjectMemberRoleChanged,
    // Version actions
    VersionCreated,
    VersionUpdated,
    // System actions
    UserLogin,
    UserLogout,
    SystemBackup,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // snake_case wire name, via serde
        let s = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(s.trim_matches('"'))
    }
}

/// A changelog row, as listed under a project's history.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangelogEntry {
    pub id: i64,
    pub action_type: ActionType,
    pub action_description: String,
    #[serde(default)]
    pub action_display_name: Option<String>,
    pub user_id: i64,
    pub user_name: String,
    pub user_role: String,
    #[serde(default)]
    pub target_type: Option<String>,
    #[serde(default)]
    pub target_id: Option<i64>,
    #[serde(default)]
    pub target_name: Option<String>,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub old_values: Option<String>,
    #[serde(default)]
    pub new_values: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Full entry detail, `GET /api/changelog/{id}`.
///
/// Unlike the list row, before/after values arrive as structured JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangelogDetail {
    pub id: i64,
    pub action_type: ActionType,
    pub action_description: String,
    #[serde(default)]
    pub action_display_name: Option<String>,
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub user_role: String,
    #[serde(default)]
    pub user_position: Option<String>,
    #[serde(default)]
    pub target_type: Option<String>,
    #[serde(default)]
    pub target_id: Option<i64>,
    #[serde(default)]
    pub target_name: Option<String>,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub old_values: Option<serde_json::Value>,
    #[serde(default)]
    pub new_values: Option<serde_json::Value>,
    #[serde(default)]
    pub extra_data: Option<serde_json::Value>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One page of a project's history, `GET /api/changelog/project/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangelogPage {
    pub changelogs: Vec<ChangelogEntry>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
}

impl ChangelogPage {
    /// Whether a further page exists after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Per-project card of the changelog overview.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectChangelog {
    pub project_id: i64,
    pub project_name: String,
    pub project_status: String,
    #[serde(default)]
    pub project_description: Option<String>,
    pub device_name: String,
    pub members_count: u32,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub recent_changes: Vec<ChangelogEntry>,
    pub total_changes: u64,
}

/// The overview itself, `GET /api/changelog/projects`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangelogOverview {
    pub projects: Vec<ProjectChangelog>,
    pub total_projects: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&ActionType::ProjectMemberRoleChanged).unwrap(),
            "\"project_member_role_changed\""
        );
        let parsed: ActionType = serde_json::from_str("\"risk_deleted\"").unwrap();
        assert_eq!(parsed, ActionType::RiskDeleted);
    }

    #[test]
    fn test_action_type_display() {
        assert_eq!(ActionType::UserLogin.to_string(), "user_login");
    }

    #[test]
    fn test_page_has_next() {
        let json = serde_json::json!({
            "changelogs": [],
            "total": 45,
            "page": 2,
            "size": 20,
            "total_pages": 3
        });
        let page: ChangelogPage = serde_json::from_value(json).unwrap();
        assert!(page.has_next());

        let json = serde_json::json!({
            "changelogs": [],
            "total": 45,
            "page": 3,
            "size": 20,
            "total_pages": 3
        });
        let page: ChangelogPage = serde_json::from_value(json).unwrap();
        assert!(!page.has_next());
    }

    #[test]
    fn test_detail_values_are_structured() {
        let json = serde_json::json!({
            "id": 8,
            "action_type": "project_updated",
            "action_description": "Project renamed",
            "user_id": 2,
            "user_name": "Ayo Bello",
            "user_email": "ayo@example.com",
            "user_role": "SYS_ADMIN",
            "old_values": {"name": "Pump"},
            "new_values": {"name": "Infusion pump"},
            "created_at": "2025-05-02T10:00:00Z"
        });
        let detail: ChangelogDetail = serde_json::from_value(json).unwrap();
        assert_eq!(
            detail.old_values.unwrap()["name"],
            serde_json::json!("Pump")
        );
    }
}
