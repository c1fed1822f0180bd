//! Command handlers — one module per page of the console.
//!
//! Every handler follows the same thin-controller shape: run the guard,
//! fetch, render, and after any mutation re-fetch the full listing instead
//! of patching local state.

pub mod account;
pub mod auth;
pub mod changelog;
pub mod config_handlers;
pub mod dashboard;
pub mod project;
pub mod risks;
pub mod roles;

use cardea_auth::{Access, EntraProvider, Guard};
use cardea_client::ApiClient;
use cardea_core::model::User;

use crate::cli::{Cli, Command};
use crate::config::CardeaConfig;
use crate::error::{Error, Result};

/// An authorized page context: the caller and a token-carrying client.
pub(crate) struct Page {
    pub user: User,
    pub client: ApiClient,
}

/// Top-level dispatch.
pub async fn dispatch(cli: Cli, config: CardeaConfig) -> Result<()> {
    match cli.command {
        Command::Login(args) => auth::login(&config, args).await,
        Command::Logout => auth::logout(&config).await,
        Command::Whoami => auth::whoami(&config).await,
        Command::Dashboard => dashboard::show(&config).await,
        Command::Project { action } => project::run(&config, action).await,
        Command::Risks { action } => risks::run(&config, action).await,
        Command::Roles { action } => roles::run(&config, action).await,
        Command::Account { action } => account::run(&config, action).await,
        Command::Changelog { action } => changelog::run(&config, action).await,
        Command::Config { action } => config_handlers::run(cli.config.as_deref(), action),
    }
}

/// Assembles the guard from configuration.
pub(crate) fn build_guard(config: &CardeaConfig) -> Result<Guard<EntraProvider, ApiClient>> {
    let client = config.api_client()?;
    let provider = EntraProvider::new(config.entra_config()?)?;
    let store = config.session_store()?;
    Ok(Guard::new(provider, client, store))
}

/// Runs the route guard in front of a page.
///
/// Returns `Ok(None)` when the role-pending notice was rendered instead of
/// the page (every page except the account one). Unauthenticated callers
/// get [`Error::NotSignedIn`] — the CLI's redirect-to-login.
pub(crate) async fn authorize(
    config: &CardeaConfig,
    allow_role_pending: bool,
) -> Result<Option<Page>> {
    let guard = build_guard(config)?;
    let access = guard.check().await;

    let user = match access {
        Access::Granted(user) => user,
        Access::RolePending(user) => {
            if !allow_role_pending {
                print_role_pending_notice(&user);
                return Ok(None);
            }
            user
        }
        Access::Denied => return Err(Error::NotSignedIn),
    };

    let session = guard.store().load().ok_or(Error::NotSignedIn)?;
    let client = config.api_client()?.with_token(session.access_token);
    Ok(Some(Page { user, client }))
}

fn print_role_pending_notice(user: &User) {
    println!("Welcome, {}!", user.display_name());
    println!("Your account exists but no role has been assigned yet.");
    println!("Ask an administrator to assign one.");
    println!("Until then, only profile settings are available: `cardea account show`.");
}
