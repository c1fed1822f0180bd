//! The audit changelog viewer.
//!
//! Read-only: the changelog is generated server-side on every mutation.
//! Access failures render the page's dedicated messages — 403 for
//! non-administrators, 404 for unknown targets.

use cardea_client::Error as ClientError;
use cardea_core::model::{ChangelogDetail, ChangelogEntry};

use crate::cli::ChangelogAction;
use crate::commands::{authorize, Page};
use crate::config::CardeaConfig;
use crate::error::{Error, Result};
use crate::render;

pub async fn run(config: &CardeaConfig, action: ChangelogAction) -> Result<()> {
    let Some(page) = authorize(config, false).await? else {
        return Ok(());
    };

    let outcome = match action {
        ChangelogAction::Projects => overview(&page).await,
        ChangelogAction::History {
            project_id,
            page: page_no,
            size,
        } => history(&page, project_id, page_no, size).await,
        ChangelogAction::Show { changelog_id } => show(&page, changelog_id).await,
    };

    // The page's two dedicated error messages.
    match outcome {
        Err(Error::Client(ClientError::AccessDenied)) => Err(Error::Forbidden {
            action: "the changelog",
            requires: "the SYS_ADMIN role",
        }),
        other => other,
    }
}

async fn overview(page: &Page) -> Result<()> {
    let overview = page.client.changelog_overview().await?;
    if overview.projects.is_empty() {
        println!("No tracked projects.");
        return Ok(());
    }

    for project in &overview.projects {
        println!(
            "{} (id {}) — {} — {} change(s), {} member(s), updated {}",
            project.project_name,
            project.project_id,
            project.project_status,
            project.total_changes,
            project.members_count,
            render::timestamp(&project.last_updated),
        );
        for entry in &project.recent_changes {
            println!("    {}", entry_line(entry));
        }
        println!();
    }
    println!("{} project(s)", overview.total_projects);
    Ok(())
}

async fn history(page: &Page, project_id: i64, page_no: u32, size: u32) -> Result<()> {
    let history = page.client.project_changelog(project_id, page_no, size).await?;

    if history.changelogs.is_empty() {
        println!("No changes on page {page_no}.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = history
        .changelogs
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                render::timestamp(&e.created_at),
                e.action_type.to_string(),
                e.user_name.clone(),
                render::truncate(&e.action_description, 48),
            ]
        })
        .collect();
    println!(
        "{}",
        render::table(&["ID", "WHEN", "ACTION", "WHO", "DESCRIPTION"], &rows)
    );

    println!(
        "\nPage {} of {} ({} total)",
        history.page, history.total_pages, history.total
    );
    if history.has_next() {
        println!(
            "Next: cardea changelog history {project_id} --page {} --size {size}",
            history.page + 1
        );
    }
    Ok(())
}

async fn show(page: &Page, changelog_id: i64) -> Result<()> {
    let detail = page.client.changelog_entry(changelog_id).await?;
    print_detail(&detail);
    Ok(())
}

fn entry_line(entry: &ChangelogEntry) -> String {
    format!(
        "{}  {}  {}  {}",
        render::timestamp(&entry.created_at),
        entry.action_type,
        entry.user_name,
        render::truncate(&entry.action_description, 56),
    )
}

fn print_detail(detail: &ChangelogDetail) {
    let width = 12;
    println!("{}", render::kv("Entry", &detail.id.to_string(), width));
    println!("{}", render::kv("Action", &detail.action_type.to_string(), width));
    println!("{}", render::kv("Description", &detail.action_description, width));
    println!(
        "{}",
        render::kv(
            "Actor",
            &format!("{} <{}> ({})", detail.user_name, detail.user_email, detail.user_role),
            width
        )
    );
    if let (Some(target_type), Some(target_name)) = (&detail.target_type, &detail.target_name) {
        println!("{}", render::kv("Target", &format!("{target_type} {target_name}"), width));
    }
    if let Some(project_name) = &detail.project_name {
        println!("{}", render::kv("Project", project_name, width));
    }
    println!("{}", render::kv("When", &render::timestamp(&detail.created_at), width));
    if let Some(ip) = &detail.ip_address {
        println!("{}", render::kv("From", ip, width));
    }

    if let Some(old) = &detail.old_values {
        println!("\nBefore:");
        println!("{}", serde_json::to_string_pretty(old).unwrap_or_default());
    }
    if let Some(new) = &detail.new_values {
        println!("\nAfter:");
        println!("{}", serde_json::to_string_pretty(new).unwrap_or_default());
    }
}
