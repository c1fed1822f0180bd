//! Project pages: detail view, create/edit form, membership, versions.

use cardea_core::model::{MemberDraft, ProjectDraft, ProjectUpdate, VersionDraft};
use cardea_core::perms;

use crate::cli::ProjectAction;
use crate::commands::{authorize, Page};
use crate::config::CardeaConfig;
use crate::error::{Error, Result};
use crate::render;

pub async fn run(config: &CardeaConfig, action: ProjectAction) -> Result<()> {
    let Some(page) = authorize(config, false).await? else {
        return Ok(());
    };

    match action {
        ProjectAction::Show { id } => show(&page, id).await,
        ProjectAction::Create {
            name,
            device,
            description,
            device_model,
            device_purpose,
            classification,
            intended_use,
        } => {
            let draft = ProjectDraft {
                name,
                description,
                device_name: device,
                device_model,
                device_purpose,
                device_classification: classification,
                intended_use,
                status: None,
            };
            create(&page, draft).await
        }
        ProjectAction::Edit {
            id,
            name,
            description,
            status,
            device_name,
            progress,
        } => {
            let update = ProjectUpdate {
                name,
                description,
                status,
                device_name,
                progress_percentage: progress,
                ..ProjectUpdate::default()
            };
            edit(&page, id, update).await
        }
        ProjectAction::Delete { id, yes } => delete(&page, id, yes).await,
        ProjectAction::Members { id } => members(&page, id).await,
        ProjectAction::MemberAdd { id, user, role } => {
            member_add(&page, id, MemberDraft { user_id: user, role }).await
        }
        ProjectAction::MemberRemove { id, user } => member_remove(&page, id, user).await,
        ProjectAction::Version {
            id,
            version,
            description,
        } => tag_version(&page, id, VersionDraft { version, description }).await,
    }
}

async fn show(page: &Page, id: i64) -> Result<()> {
    let project = page.client.get_project(id).await?;

    let width = 16;
    println!("{}", render::kv("Project", &project.name, width));
    println!("{}", render::kv("Status", project.status.as_str(), width));
    println!(
        "{}",
        render::kv("Progress", &format!("{:.0}%", project.progress_percentage), width)
    );
    println!("{}", render::kv("Device", &project.device_name, width));
    println!("{}", render::kv("Model", &render::opt(&project.device_model), width));
    println!(
        "{}",
        render::kv("Classification", &render::opt(&project.device_classification), width)
    );
    println!(
        "{}",
        render::kv("Intended use", &render::opt(&project.intended_use), width)
    );
    println!(
        "{}",
        render::kv("Description", &render::opt(&project.description), width)
    );
    println!(
        "{}",
        render::kv("Created", &render::timestamp(&project.created_at), width)
    );
    println!(
        "{}",
        render::kv("Updated", &render::opt_timestamp(&project.updated_at), width)
    );

    if !project.members.is_empty() {
        println!("\nMembers:");
        for member in &project.members {
            println!("  {} <{}> — {}", member.display_name(), member.user_email, member.role);
        }
    }
    if !project.versions.is_empty() {
        println!("\nVersions:");
        for version in &project.versions {
            let marker = if version.is_current { " (current)" } else { "" };
            println!(
                "  {}{} — {}",
                version.version,
                marker,
                render::opt(&version.description)
            );
        }
    }
    Ok(())
}

async fn create(page: &Page, draft: ProjectDraft) -> Result<()> {
    let project = page.client.create_project(&draft).await?;
    println!("Created project {} (id {})", project.name, project.id);
    Ok(())
}

async fn edit(page: &Page, id: i64, update: ProjectUpdate) -> Result<()> {
    require_project_management(page, id).await?;
    page.client.update_project(id, &update).await?;
    // Server of record: render the re-fetched state, not our patch.
    let project = page.client.get_project(id).await?;
    println!(
        "Updated project {} (status {}, progress {:.0}%)",
        project.name, project.status, project.progress_percentage
    );
    Ok(())
}

async fn delete(page: &Page, id: i64, yes: bool) -> Result<()> {
    require_project_management(page, id).await?;
    if !yes {
        println!("This permanently deletes project {id} and its risk register.");
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }
    page.client.delete_project(id).await?;
    println!("Project {id} deleted.");
    Ok(())
}

async fn members(page: &Page, id: i64) -> Result<()> {
    let members = page.client.list_members(id).await?;
    if members.is_empty() {
        println!("No members.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = members
        .iter()
        .map(|m| {
            vec![
                m.user_id.to_string(),
                m.display_name(),
                m.user_email.clone(),
                m.role.to_string(),
                render::timestamp(&m.joined_at),
            ]
        })
        .collect();
    println!(
        "{}",
        render::table(&["USER", "NAME", "EMAIL", "ROLE", "JOINED"], &rows)
    );
    Ok(())
}

async fn member_add(page: &Page, id: i64, draft: MemberDraft) -> Result<()> {
    require_project_management(page, id).await?;
    page.client.add_member(id, &draft).await?;
    println!("Added user {} as {}.", draft.user_id, draft.role);
    members(page, id).await
}

async fn member_remove(page: &Page, id: i64, user_id: i64) -> Result<()> {
    require_project_management(page, id).await?;
    page.client.remove_member(id, user_id).await?;
    println!("Removed user {user_id}.");
    members(page, id).await
}

async fn tag_version(page: &Page, id: i64, draft: VersionDraft) -> Result<()> {
    require_project_management(page, id).await?;
    let version = page.client.create_version(id, &draft).await?;
    println!("Tagged version {} on project {id}.", version.version);
    Ok(())
}

/// Client-side gate for project/membership mutations; the server enforces
/// the real rule either way.
async fn require_project_management(page: &Page, project_id: i64) -> Result<()> {
    let project = page.client.get_project(project_id).await?;
    let project_role = project.role_of(page.user.id);
    if perms::can_manage_project(&page.user, project_role) {
        return Ok(());
    }
    Err(Error::Forbidden {
        action: "project management",
        requires: "a project admin or manager role",
    })
}
