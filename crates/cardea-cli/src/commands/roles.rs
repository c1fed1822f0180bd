//! User and role administration.

use cardea_core::model::{SystemRole, UserUpdate, UserWithProjects};
use cardea_core::perms;

use crate::cli::RolesAction;
use crate::commands::{authorize, Page};
use crate::config::CardeaConfig;
use crate::error::{Error, Result};
use crate::render;

pub async fn run(config: &CardeaConfig, action: RolesAction) -> Result<()> {
    let Some(page) = authorize(config, false).await? else {
        return Ok(());
    };

    // The whole page is admin-only; the server enforces the same rule.
    if !perms::can_administer_users(&page.user) {
        return Err(Error::Forbidden {
            action: "role management",
            requires: "the SYS_ADMIN role",
        });
    }

    match action {
        RolesAction::List => list(&page).await,
        RolesAction::SetRole { user_id, role } => set_role(&page, user_id, role).await,
        RolesAction::Activate { user_id } => set_active(&page, user_id, true).await,
        RolesAction::Deactivate { user_id } => set_active(&page, user_id, false).await,
        RolesAction::Remove { user_id, yes } => remove(&page, user_id, yes).await,
    }
}

async fn list(page: &Page) -> Result<()> {
    let users = page.client.users_with_projects().await?;
    if users.is_empty() {
        println!("No accounts.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = users.iter().map(user_row).collect();
    println!(
        "{}",
        render::table(
            &["ID", "NAME", "EMAIL", "ROLE", "LAST LOGIN", "PROJECTS"],
            &rows
        )
    );
    Ok(())
}

fn user_row(user: &UserWithProjects) -> Vec<String> {
    let projects = if user.projects.is_empty() {
        "-".to_string()
    } else {
        user.projects
            .iter()
            .map(|p| format!("{} ({})", p.name, p.role))
            .collect::<Vec<_>>()
            .join(", ")
    };
    vec![
        user.id.to_string(),
        format!("{} {}", user.first_name, user.last_name).trim().to_string(),
        user.email.clone(),
        user.role
            .map(|r| r.to_string())
            .unwrap_or_else(|| "(pending)".to_string()),
        render::opt_timestamp(&user.last_login),
        render::truncate(&projects, 48),
    ]
}

async fn set_role(page: &Page, user_id: i64, role: SystemRole) -> Result<()> {
    let update = UserUpdate {
        role: Some(role),
        ..UserUpdate::default()
    };
    let user = page.client.update_user(user_id, &update).await?;
    println!("{} is now {role}.\n", user.display_name());
    list(page).await
}

async fn set_active(page: &Page, user_id: i64, is_active: bool) -> Result<()> {
    page.client.set_user_active(user_id, is_active).await?;
    println!(
        "User {user_id} {}.\n",
        if is_active { "activated" } else { "deactivated" }
    );
    list(page).await
}

async fn remove(page: &Page, user_id: i64, yes: bool) -> Result<()> {
    if !yes {
        println!("This permanently deletes account {user_id}.");
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }
    page.client.delete_user(user_id).await?;
    println!("Account {user_id} deleted.\n");
    list(page).await
}
