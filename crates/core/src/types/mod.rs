//! Core types for Pricelens.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod geo;
pub mod id;
pub mod price;
pub mod role;

pub use email::{Email, EmailError};
pub use geo::{Coordinate, EARTH_RADIUS_KM, haversine_distance};
pub use id::*;
pub use price::{Price, PriceError};
pub use role::Role;
