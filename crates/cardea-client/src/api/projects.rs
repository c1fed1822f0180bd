//! Project endpoints: `/api/projects/*`.

use cardea_core::model::{
    MemberDraft, Project, ProjectDraft, ProjectMember, ProjectSummary, ProjectUpdate,
    ProjectVersion, VersionDraft,
};

use crate::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// All projects visible to the caller (the dashboard listing).
    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        self.get_json("/api/projects/").await
    }

    /// Full project detail, including members and versions.
    pub async fn get_project(&self, project_id: i64) -> Result<Project> {
        self.get_json(&format!("/api/projects/{project_id}")).await
    }

    /// Creates a project; the caller becomes its owner/admin server-side.
    pub async fn create_project(&self, draft: &ProjectDraft) -> Result<Project> {
        self.post_json("/api/projects/", draft).await
    }

    /// Applies a partial update.
    pub async fn update_project(&self, project_id: i64, update: &ProjectUpdate) -> Result<Project> {
        self.put_json(&format!("/api/projects/{project_id}"), update)
            .await
    }

    /// Deletes a project and everything under it.
    pub async fn delete_project(&self, project_id: i64) -> Result<()> {
        self.delete(&format!("/api/projects/{project_id}")).await
    }

    /// The project's member roster.
    pub async fn list_members(&self, project_id: i64) -> Result<Vec<ProjectMember>> {
        self.get_json(&format!("/api/projects/{project_id}/members"))
            .await
    }

    /// Adds a member with a project role.
    pub async fn add_member(&self, project_id: i64, draft: &MemberDraft) -> Result<ProjectMember> {
        self.post_json(&format!("/api/projects/{project_id}/members"), draft)
            .await
    }

    /// Removes a member by user id.
    pub async fn remove_member(&self, project_id: i64, user_id: i64) -> Result<()> {
        self.delete(&format!("/api/projects/{project_id}/members/{user_id}"))
            .await
    }

    /// Tags a new project version.
    pub async fn create_version(
        &self,
        project_id: i64,
        draft: &VersionDraft,
    ) -> Result<ProjectVersion> {
        self.post_json(&format!("/api/projects/{project_id}/versions"), draft)
            .await
    }
}
