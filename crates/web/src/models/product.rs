//! Product domain types.

use chrono::{DateTime, Utc};

use pricelens_core::{Coordinate, Price, ProductId, ShopId};

/// A priced item listed under exactly one shop (domain type).
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Owning shop.
    pub shop_id: ShopId,
    /// Product display name.
    pub name: String,
    /// Free-text category.
    pub category: String,
    /// Listed price (non-negative).
    pub price: Price,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional image reference.
    pub image_url: Option<String>,
    /// When the product was listed.
    pub created_at: DateTime<Utc>,
}

/// A product joined with its owning shop, as shown in the compare view.
#[derive(Debug, Clone)]
pub struct ProductOffer {
    /// Product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Product category.
    pub category: String,
    /// Listed price.
    pub price: Price,
    /// Owning shop ID.
    pub shop_id: ShopId,
    /// Owning shop's name.
    pub shop_name: String,
    /// Owning shop's address.
    pub shop_address: String,
    /// Owning shop's location, if resolved.
    pub shop_location: Option<Coordinate>,
}
