//! Catalog filtering and comparison logic.
//!
//! Pure functions over owned data: the locator derives the displayed shop
//! list from raw records plus transient view state, and the compare module
//! ranks product offers by price. Both are total and idempotent, so handlers
//! recompute them in full on every request instead of patching incrementally.

pub mod compare;
pub mod locator;

pub use compare::{RankedOffer, rank_by_price};
pub use locator::{CategoryFilter, LocatedShop, ShopQuery, locate};
