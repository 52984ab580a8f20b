//! HTTP route handlers for Pricelens.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /about                  - About page
//! GET  /health                 - Health check
//!
//! # Shops
//! GET  /shops                  - Shop locator (search, category, distance sort)
//! GET  /shops/{id}             - Shop detail with its products
//!
//! # Compare
//! GET  /compare                - Product price comparison across shops
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Dashboard (requires shopkeeper)
//! GET  /dashboard                        - Shop and product management
//! POST /dashboard/shop                   - Create or update own shop
//! POST /dashboard/products               - Add product
//! POST /dashboard/products/{id}          - Update product
//! POST /dashboard/products/{id}/delete   - Delete product
//! ```

pub mod auth;
pub mod compare;
pub mod dashboard;
pub mod home;
pub mod shops;

use axum::{
    Router,
    routing::{get, post},
};
use serde::{Deserialize, Deserializer};

use crate::state::AppState;

/// Deserialize empty strings as None for optional query and form fields.
///
/// Browsers submit untouched form fields as empty strings, not absent ones.
pub(crate) fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shops::index))
        .route("/{id}", get(shops::show))
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/shop", post(dashboard::save_shop))
        .route("/products", post(dashboard::create_product))
        .route("/products/{id}", post(dashboard::update_product))
        .route("/products/{id}/delete", post(dashboard::delete_product))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home and about pages
        .route("/", get(home::home))
        .route("/about", get(home::about))
        // Shop locator + detail
        .nest("/shops", shop_routes())
        // Price comparison
        .route("/compare", get(compare::index))
        // Shopkeeper dashboard
        .nest("/dashboard", dashboard_routes())
        // Auth routes
        .nest("/auth", auth_routes())
}
