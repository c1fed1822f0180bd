//! Changelog endpoints: `/api/changelog/*`.
//!
//! The changelog is server-owned and append-only; this client only reads it.

use cardea_core::model::{ChangelogDetail, ChangelogOverview, ChangelogPage};

use crate::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// Per-project cards with the most recent changes.
    pub async fn changelog_overview(&self) -> Result<ChangelogOverview> {
        self.get_json("/api/changelog/projects").await
    }

    /// One page of a project's history. Pages are 1-based.
    pub async fn project_changelog(
        &self,
        project_id: i64,
        page: u32,
        size: u32,
    ) -> Result<ChangelogPage> {
        self.get_json(&format!(
            "/api/changelog/project/{project_id}?page={page}&size={size}"
        ))
        .await
    }

    /// Full detail of one entry, including before/after values.
    pub async fn changelog_entry(&self, changelog_id: i64) -> Result<ChangelogDetail> {
        self.get_json(&format!("/api/changelog/{changelog_id}")).await
    }
}
