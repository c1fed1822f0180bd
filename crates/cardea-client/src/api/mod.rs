//! Endpoint methods, grouped by resource.
//!
//! Each module adds an `impl ApiClient` block for one base path:
//!
//! - [`auth`]: `/api/auth/*`
//! - [`projects`]: `/api/projects/*`
//! - [`users`]: `/api/users/*`
//! - [`risks`]: `/api/risk-analyses/*`
//! - [`changelog`]: `/api/changelog/*`

pub mod auth;
pub mod changelog;
pub mod projects;
pub mod risks;
pub mod users;

pub use auth::TokenResponse;
