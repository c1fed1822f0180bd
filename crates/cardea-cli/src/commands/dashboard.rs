//! The dashboard: every project visible to the caller.

use crate::commands::authorize;
use crate::config::CardeaConfig;
use crate::error::Result;
use crate::render;

/// `cardea dashboard`
pub async fn show(config: &CardeaConfig) -> Result<()> {
    let Some(page) = authorize(config, false).await? else {
        return Ok(());
    };

    let projects = page.client.list_projects().await?;
    if projects.is_empty() {
        println!("No projects yet. Create one with `cardea project create`.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = projects
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.device_name.clone(),
                p.status.to_string(),
                format!("{:.0}%", p.progress_percentage),
                p.member_count.to_string(),
                p.user_role
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();

    println!(
        "{}",
        render::table(
            &["ID", "NAME", "DEVICE", "STATUS", "PROGRESS", "MEMBERS", "MY ROLE"],
            &rows
        )
    );
    println!("\n{} project(s)", projects.len());
    Ok(())
}
