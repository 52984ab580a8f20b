//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a distance in kilometers with one decimal place.
///
/// Usage in templates: `{{ distance|km }}`
#[askama::filter_fn]
pub fn km(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("{value:.1} km"))
}

/// Formats a price in rupees.
///
/// Usage in templates: `{{ offer.price|inr }}`
#[askama::filter_fn]
pub fn inr(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("\u{20b9}{value}"))
}
