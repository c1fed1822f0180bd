//! Command-line surface of the console.
//!
//! Every data-bearing subcommand is one page: fetch on entry, render,
//! dispatch mutations, re-fetch.

use clap::{ArgAction, Args, Parser, Subcommand};

use cardea_core::model::{HazardCategory, LifecycleStage, ProjectRole, ProjectStatus, SystemRole};
use cardea_core::scoring::RiskLevel;

/// Cardea — console for the medical-device risk-management platform
#[derive(Parser, Debug)]
#[command(name = "cardea")]
#[command(about = "Cardea risk-management console", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// API base URL (overrides configuration)
    #[arg(long, global = true, env = "CARDEA_API_URL")]
    pub api_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in (password or identity-provider session)
    Login(LoginArgs),
    /// Sign out and drop the local session
    Logout,
    /// Show who the stored session belongs to
    Whoami,
    /// Project overview (the dashboard)
    Dashboard,
    /// Project pages: detail, form, membership
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// The risk register of a project
    Risks {
        #[command(subcommand)]
        action: RisksAction,
    },
    /// User and role administration
    Roles {
        #[command(subcommand)]
        action: RolesAction,
    },
    /// Profile settings (available before a role is assigned)
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// The audit changelog viewer
    Changelog {
        #[command(subcommand)]
        action: ChangelogAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Email for password login
    #[arg(long, required_unless_present = "sso")]
    pub email: Option<String>,

    /// Password for password login
    #[arg(long, env = "CARDEA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Use the cached identity-provider session instead of a password
    #[arg(long)]
    pub sso: bool,
}

#[derive(Subcommand, Debug)]
pub enum ProjectAction {
    /// Project detail, members, and versions
    Show {
        /// Project id
        id: i64,
    },
    /// Create a project
    Create {
        /// Project name
        name: String,
        /// Device name
        #[arg(long)]
        device: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        device_model: Option<String>,
        #[arg(long)]
        device_purpose: Option<String>,
        #[arg(long)]
        classification: Option<String>,
        #[arg(long)]
        intended_use: Option<String>,
    },
    /// Edit project fields
    Edit {
        /// Project id
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<ProjectStatus>,
        #[arg(long)]
        device_name: Option<String>,
        #[arg(long)]
        progress: Option<f64>,
    },
    /// Delete a project
    Delete {
        /// Project id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List project members
    Members {
        /// Project id
        id: i64,
    },
    /// Add a member with a project role
    MemberAdd {
        /// Project id
        id: i64,
        /// User id to add
        #[arg(long)]
        user: i64,
        /// Project role: admin, manager, or doctor
        #[arg(long, default_value = "doctor")]
        role: ProjectRole,
    },
    /// Remove a member
    MemberRemove {
        /// Project id
        id: i64,
        /// User id to remove
        #[arg(long)]
        user: i64,
    },
    /// Tag a project version
    Version {
        /// Project id
        id: i64,
        /// Version label, e.g. "1.1"
        version: String,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum RisksAction {
    /// The register: summary cards plus the filtered table
    List {
        /// Project id
        project_id: i64,
        /// Only factors in this risk-level bucket
        #[arg(long)]
        level: Option<RiskLevel>,
        /// Only factors in this hazard category
        #[arg(long)]
        category: Option<HazardCategory>,
        /// Only factors whose hazard, situation, or harm contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a risk factor (creates the analysis on first use)
    Add {
        /// Project id
        project_id: i64,
        #[arg(long, default_value = "operation")]
        stage: LifecycleStage,
        /// Hazard name
        #[arg(long)]
        hazard: String,
        /// Hazardous situation
        #[arg(long)]
        situation: String,
        /// Sequence of events
        #[arg(long)]
        sequence: String,
        /// Resulting harm
        #[arg(long)]
        harm: String,
        #[arg(long, default_value = "biological_chemical")]
        category: HazardCategory,
        /// Severity 1-5
        #[arg(long)]
        severity: u8,
        /// Probability 1-5
        #[arg(long)]
        probability: u8,
        /// Control measures
        #[arg(long)]
        controls: Option<String>,
    },
    /// Edit a risk factor
    Edit {
        /// Project id (for the re-fetch after the update)
        project_id: i64,
        /// Factor id
        factor_id: i64,
        #[arg(long)]
        stage: Option<LifecycleStage>,
        #[arg(long)]
        hazard: Option<String>,
        #[arg(long)]
        situation: Option<String>,
        #[arg(long)]
        sequence: Option<String>,
        #[arg(long)]
        harm: Option<String>,
        #[arg(long)]
        category: Option<HazardCategory>,
        #[arg(long)]
        severity: Option<u8>,
        #[arg(long)]
        probability: Option<u8>,
        #[arg(long)]
        controls: Option<String>,
    },
    /// Delete a risk factor
    Delete {
        /// Project id (for the re-fetch after the delete)
        project_id: i64,
        /// Factor id
        factor_id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Cross-project analysis summaries
    Summary,
}

#[derive(Subcommand, Debug)]
pub enum RolesAction {
    /// All accounts with their projects and roles
    List,
    /// Assign a system role
    SetRole {
        /// User id
        user_id: i64,
        /// SYS_ADMIN or USER
        role: SystemRole,
    },
    /// Reactivate an account
    Activate {
        /// User id
        user_id: i64,
    },
    /// Deactivate an account
    Deactivate {
        /// User id
        user_id: i64,
    },
    /// Delete an account
    Remove {
        /// User id
        user_id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountAction {
    /// Profile and usage statistics
    Show,
    /// Update profile fields
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// Interface language, "en" or "ru"
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        timezone: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ChangelogAction {
    /// Per-project overview with recent changes
    Projects,
    /// One project's history, paginated
    History {
        /// Project id
        project_id: i64,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Entries per page
        #[arg(long, default_value_t = 20)]
        size: u32,
    },
    /// Full detail of one entry
    Show {
        /// Changelog entry id
        changelog_id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Get a configuration value by dotted key
    Get {
        /// Dotted key, e.g. `api.base_url`
        key: String,
    },
    /// Set a configuration value by dotted key
    Set {
        /// Dotted key, e.g. `api.timeout_secs`
        key: String,
        /// New value (type auto-detected)
        value: String,
    },
    /// Create a default configuration file
    Init {
        /// Write to this path instead of the default location
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_risks_list_parses_filters() {
        let cli = Cli::parse_from([
            "cardea", "risks", "list", "12", "--level", "high", "--category", "software",
            "--search", "overdose",
        ]);
        let Command::Risks {
            action:
                RisksAction::List {
                    project_id,
                    level,
                    category,
                    search,
                },
        } = cli.command
        else {
            panic!("expected risks list");
        };
        assert_eq!(project_id, 12);
        assert_eq!(level, Some(RiskLevel::High));
        assert_eq!(category, Some(HazardCategory::Software));
        assert_eq!(search.as_deref(), Some("overdose"));
    }

    #[test]
    fn test_login_requires_email_or_sso() {
        assert!(Cli::try_parse_from(["cardea", "login"]).is_err());
        assert!(Cli::try_parse_from(["cardea", "login", "--sso"]).is_ok());
        assert!(Cli::try_parse_from(["cardea", "login", "--email", "a@b.c"]).is_ok());
    }

    #[test]
    fn test_changelog_history_defaults() {
        let cli = Cli::parse_from(["cardea", "changelog", "history", "3"]);
        let Command::Changelog {
            action: ChangelogAction::History { project_id, page, size },
        } = cli.command
        else {
            panic!("expected changelog history");
        };
        assert_eq!((project_id, page, size), (3, 1, 20));
    }
}
