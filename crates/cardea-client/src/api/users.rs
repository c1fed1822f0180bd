//! User administration endpoints: `/api/users/*`.

use serde::Serialize;

use cardea_core::model::{User, UserDraft, UserStatistics, UserUpdate, UserWithProjects};

use crate::client::ApiClient;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct ActivatePayload {
    is_active: bool,
}

impl ApiClient {
    /// Every account (admin listing; also feeds member pickers).
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.get_json("/api/users/").await
    }

    /// Accounts annotated with their project memberships — the
    /// role-management page's source.
    pub async fn users_with_projects(&self) -> Result<Vec<UserWithProjects>> {
        self.get_json("/api/users/with-projects").await
    }

    /// Creates an account directly (admin only; the usual path is
    /// provisioning on first identity-provider login).
    pub async fn create_user(&self, draft: &UserDraft) -> Result<User> {
        self.post_json("/api/users/", draft).await
    }

    /// One account by id.
    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        self.get_json(&format!("/api/users/{user_id}")).await
    }

    /// Partial profile/role update. Used both by the account page (own
    /// profile) and the role-management page (system role changes).
    pub async fn update_user(&self, user_id: i64, update: &UserUpdate) -> Result<User> {
        self.put_json(&format!("/api/users/{user_id}"), update).await
    }

    /// Activates or deactivates an account.
    pub async fn set_user_active(&self, user_id: i64, is_active: bool) -> Result<()> {
        let _: serde_json::Value = self
            .put_json(
                &format!("/api/users/{user_id}/activate"),
                &ActivatePayload { is_active },
            )
            .await?;
        Ok(())
    }

    /// Deletes an account.
    pub async fn delete_user(&self, user_id: i64) -> Result<()> {
        self.delete(&format!("/api/users/{user_id}")).await
    }

    /// The caller's own aggregates for the account page.
    pub async fn my_statistics(&self) -> Result<UserStatistics> {
        self.get_json("/api/users/me/statistics").await
    }
}
