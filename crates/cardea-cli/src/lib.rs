//! # cardea-cli
//!
//! Command-line console for the Cardea risk-management platform.
//!
//! Each subcommand is a thin controller over the REST API:
//! - `login` / `logout` / `whoami` — session management
//! - `dashboard` — the project overview
//! - `project` — detail, create/edit form, membership, versions
//! - `risks` — the risk register with client-side filtering
//! - `roles` — user and role administration
//! - `account` — profile settings (available before a role is assigned)
//! - `changelog` — the audit trail viewer
//! - `config` — configuration management

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

pub use cli::Cli;
pub use config::CardeaConfig;
pub use error::{Error, Result};
