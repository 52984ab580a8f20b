//! HTTP middleware stack for Pricelens.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Session layer (tower-sessions with `PostgreSQL` store)
//! 3. Auth extractors (per-handler, not a layer)

pub mod auth;
pub mod session;

pub use auth::{
    OptionalAuth, RequireAuth, RequireShopkeeper, clear_current_user, set_current_user,
};
pub use session::create_session_layer;
