//! Login, logout, whoami.

use crate::cli::LoginArgs;
use crate::commands::{authorize, build_guard};
use crate::config::CardeaConfig;
use crate::error::{Error, Result};
use crate::render;

/// `cardea login` — password grant, or the silent identity-provider
/// handshake with `--sso`.
pub async fn login(config: &CardeaConfig, args: LoginArgs) -> Result<()> {
    let guard = build_guard(config)?;

    let user = if args.sso {
        guard.login_sso().await?
    } else {
        let email = args.email.ok_or_else(|| {
            Error::config("--email is required for password login (or use --sso)")
        })?;
        let password = args.password.ok_or_else(|| {
            Error::config("--password (or CARDEA_PASSWORD) is required for password login")
        })?;
        guard.login_password(&email, &password).await?
    };

    println!("Signed in as {} <{}>", user.display_name(), user.email);
    match user.role {
        Some(role) => println!("System role: {role}"),
        None => println!("No role assigned yet — ask an administrator."),
    }
    Ok(())
}

/// `cardea logout` — best-effort server call, unconditional local clear.
pub async fn logout(config: &CardeaConfig) -> Result<()> {
    let guard = build_guard(config)?;
    guard.logout().await?;
    println!("Signed out.");
    Ok(())
}

/// `cardea whoami` — revalidates the stored session and prints the profile.
pub async fn whoami(config: &CardeaConfig) -> Result<()> {
    let Some(page) = authorize(config, true).await? else {
        return Ok(());
    };
    let user = page.user;

    let width = 12;
    println!("{}", render::kv("Name", &user.display_name(), width));
    println!("{}", render::kv("Email", &user.email, width));
    let role = user
        .role
        .map(|r| r.to_string())
        .unwrap_or_else(|| "(pending)".to_string());
    println!("{}", render::kv("Role", &role, width));
    println!(
        "{}",
        render::kv("Last login", &render::opt_timestamp(&user.last_login), width)
    );
    Ok(())
}
