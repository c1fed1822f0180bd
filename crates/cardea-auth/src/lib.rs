//! Authentication for the Cardea console.
//!
//! Provides:
//! - [`Session`] / [`SessionStore`] — the two persisted keys (access token,
//!   profile), kept in one JSON file and cleared on logout
//! - [`IdentityProvider`] — trait for silent identity-token acquisition
//!   (implement per provider); [`EntraProvider`] for Microsoft Entra
//! - [`AuthBackend`] — the backend-facing handshake steps, implemented by
//!   `cardea_client::ApiClient`
//! - [`Guard`] / [`Access`] — the four-step route-guard handshake and its
//!   three terminal states
//! - [`Error`] — auth-specific error types

#![forbid(unsafe_code)]
#![warn(clippy::all)]

mod backend;
mod error;
mod guard;
mod provider;
mod session;

pub use backend::AuthBackend;
pub use error::{Error, Result};
pub use guard::{Access, Guard};
pub use provider::{EntraConfig, EntraProvider, IdentityProvider};
pub use session::{Session, SessionStore};
