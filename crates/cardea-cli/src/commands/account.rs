//! The account page: profile settings and usage statistics.
//!
//! This is the one page a role-pending account may use.

use cardea_core::model::UserUpdate;

use crate::cli::AccountAction;
use crate::commands::{authorize, Page};
use crate::config::CardeaConfig;
use crate::error::Result;
use crate::render;

pub async fn run(config: &CardeaConfig, action: AccountAction) -> Result<()> {
    let Some(page) = authorize(config, true).await? else {
        return Ok(());
    };

    match action {
        AccountAction::Show => show(&page).await,
        AccountAction::Update {
            first_name,
            last_name,
            language,
            phone,
            department,
            position,
            timezone,
        } => {
            let update = UserUpdate {
                first_name,
                last_name,
                language,
                phone,
                department,
                position,
                timezone,
                ..UserUpdate::default()
            };
            update_profile(config, &page, update).await
        }
    }
}

async fn show(page: &Page) -> Result<()> {
    let user = &page.user;
    let width = 12;
    println!("{}", render::kv("Name", &user.display_name(), width));
    println!("{}", render::kv("Email", &user.email, width));
    let role = user
        .role
        .map(|r| r.to_string())
        .unwrap_or_else(|| "(pending)".to_string());
    println!("{}", render::kv("Role", &role, width));
    println!("{}", render::kv("Language", &user.language, width));
    println!("{}", render::kv("Phone", &render::opt(&user.phone), width));
    println!("{}", render::kv("Department", &render::opt(&user.department), width));
    println!("{}", render::kv("Position", &render::opt(&user.position), width));
    println!("{}", render::kv("Timezone", &render::opt(&user.timezone), width));

    // Statistics need a role server-side; skip quietly while pending.
    if user.has_role() {
        match page.client.my_statistics().await {
            Ok(stats) => {
                println!();
                println!("{}", render::kv("Projects", &stats.projects_count.to_string(), width));
                println!(
                    "{}",
                    render::kv("Risks found", &stats.risks_identified.to_string(), width)
                );
                println!("{}", render::kv("Changes", &stats.changes_made.to_string(), width));
            }
            Err(err) => log::debug!("statistics unavailable: {err}"),
        }
    }
    Ok(())
}

async fn update_profile(config: &CardeaConfig, page: &Page, update: UserUpdate) -> Result<()> {
    let user = page.client.update_user(page.user.id, &update).await?;
    println!("Profile updated for {}.", user.display_name());

    // Keep the persisted profile copy in step with the server.
    let store = config.session_store()?;
    if let Some(mut session) = store.load() {
        session.profile = user;
        store.save(&session)?;
    }
    Ok(())
}
