//! Domain models for Pricelens.
//!
//! These types represent validated domain objects separate from database row
//! types; the repositories in [`crate::db`] convert at the storage boundary.

pub mod product;
pub mod session;
pub mod shop;
pub mod user;

pub use product::{Product, ProductOffer};
pub use session::{CurrentUser, keys as session_keys};
pub use shop::Shop;
pub use user::User;
