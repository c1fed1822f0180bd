//! Cardea risk-management console — umbrella crate.
//!
//! This crate re-exports all Cardea components for convenience.
//! Use feature flags to enable specific functionality.

#![doc = include_str!("../README.md")]

pub use cardea_client as client;
pub use cardea_core as core;

#[cfg(feature = "auth")]
pub use cardea_auth as auth;

#[cfg(feature = "cli")]
pub use cardea_cli as cli;
