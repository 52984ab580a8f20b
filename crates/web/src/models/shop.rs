//! Shop domain types.

use chrono::{DateTime, Utc};

use pricelens_core::{Coordinate, ShopId, UserId};

/// A registered local shop (domain type).
///
/// `location` is `Some` only when both coordinates were present in storage;
/// the repository enforces the both-or-neither invariant at the boundary.
#[derive(Debug, Clone)]
pub struct Shop {
    /// Unique shop ID.
    pub id: ShopId,
    /// Owning shopkeeper account.
    pub owner_id: UserId,
    /// Shop display name.
    pub name: String,
    /// Free-text street address.
    pub address: String,
    /// Contact phone number.
    pub contact: String,
    /// Free-text category used for grouping and filtering.
    pub category: String,
    /// Rating 0.0-5.0.
    pub rating: f64,
    /// Resolved geographic location, if the shopkeeper provided one.
    pub location: Option<Coordinate>,
    /// When the shop was registered.
    pub created_at: DateTime<Utc>,
}
