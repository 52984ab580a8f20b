//! Application services for Pricelens.

pub mod auth;

pub use auth::{AuthError, AuthService};
