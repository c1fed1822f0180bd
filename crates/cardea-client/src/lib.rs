//! # cardea-client
//!
//! Typed REST client for the Cardea risk-management API.
//!
//! This crate provides [`ApiClient`], a thin wrapper over a `reqwest`
//! connection pool:
//!
//! - One method per endpoint, grouped by resource under [`api`]
//! - Bearer-token authentication
//! - Status-code error mapping (401/403/404 get dedicated variants)
//! - No retry, no backoff, no caching — the server stays the record of truth
//!
//! Mutating callers are expected to re-fetch the affected listing after the
//! call returns rather than patching local state.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod api;
pub mod client;
pub mod error;

pub use api::TokenResponse;
pub use client::ApiClient;
pub use error::{Error, Result};
