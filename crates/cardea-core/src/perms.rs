//! Client-side role gating.
//!
//! These checks only decide what the console offers; the server re-checks
//! every call and remains the authority.

use crate::model::{ProjectRole, SystemRole, User};

/// Whether the user may add, edit, or delete risk factors in a project
/// where they hold `project_role`.
pub fn can_manage_risks(user: &User, project_role: Option<ProjectRole>) -> bool {
    if user.role == Some(SystemRole::SysAdmin) {
        return true;
    }
    matches!(
        project_role,
        Some(ProjectRole::Admin) | Some(ProjectRole::Doctor)
    )
}

/// Whether the user may edit the project or its membership.
pub fn can_manage_project(user: &User, project_role: Option<ProjectRole>) -> bool {
    if user.role == Some(SystemRole::SysAdmin) {
        return true;
    }
    matches!(
        project_role,
        Some(ProjectRole::Admin) | Some(ProjectRole::Manager)
    )
}

/// Whether the user may administer accounts and system roles.
pub fn can_administer_users(user: &User) -> bool {
    user.role == Some(SystemRole::SysAdmin)
}
