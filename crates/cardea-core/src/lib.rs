//! Cardea Core — domain model, risk scoring, and register filtering.
//!
//! This crate provides the foundational types used across all Cardea crates.
//! It has no internal Cardea dependencies (dependency level 0) and performs
//! no I/O: everything here is wire shapes plus the small amount of logic the
//! console computes client-side.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`model`]: Entities owned by the backend (users, projects, risks, changelog)
//! - [`scoring`]: Severity × probability scoring and level buckets
//! - [`filter`]: Conjunctive filtering of the risk register
//! - [`perms`]: Client-side role gating

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod error;
pub mod filter;
pub mod model;
pub mod perms;
pub mod scoring;

mod proptests;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use filter::{RegisterSummary, RiskFilter};
pub use scoring::{risk_score, RiskLevel};
