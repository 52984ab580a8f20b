//! Shop locator filter.
//!
//! Derives the displayed shop list from raw shop records plus transient view
//! state: search text, category selector, viewer location, and the
//! sort-by-distance toggle. Pipeline order matters and each stage is a total
//! function over the previous stage's output:
//!
//! 1. annotate each shop with its distance from the viewer (when both
//!    locations are known);
//! 2. case-insensitive substring filter on name OR address;
//! 3. exact category filter unless the "all" sentinel is selected;
//! 4. optional stable ascending distance sort, shops without a distance last.

use std::cmp::Ordering;

use pricelens_core::{Coordinate, haversine_distance};

use crate::models::Shop;

/// Category selector: either the "all" sentinel or one exact category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Keep every category.
    #[default]
    All,
    /// Keep only shops whose category matches exactly (case-sensitive).
    Only(String),
}

impl CategoryFilter {
    /// Sentinel value used in query strings and the dropdown.
    pub const ALL: &'static str = "all";

    /// Parse a raw selector value; empty or `"all"` means no filtering.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == Self::ALL {
            Self::All
        } else {
            Self::Only(raw.to_owned())
        }
    }

    /// Selector value for rendering the dropdown state back.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Only(category) => category,
        }
    }
}

/// Transient view state the locator filters against.
#[derive(Debug, Clone, Default)]
pub struct ShopQuery {
    /// Free-text search over shop name and address.
    pub search: String,
    /// Category selector.
    pub category: CategoryFilter,
    /// Viewer's resolved location, if geolocation succeeded.
    pub viewer: Option<Coordinate>,
    /// Sort-by-distance toggle. Has no effect without a viewer location.
    pub sort_by_distance: bool,
}

/// A shop annotated with its distance from the viewer.
#[derive(Debug, Clone)]
pub struct LocatedShop {
    pub shop: Shop,
    /// Kilometers from the viewer; `None` when either location is unknown.
    pub distance_km: Option<f64>,
}

/// Run the locator pipeline over a freshly fetched shop list.
///
/// Input order (most recently created first) is preserved unless the distance
/// sort applies; the sort is stable, and shops lacking a distance sort to the
/// end in their original relative order.
#[must_use]
pub fn locate(shops: Vec<Shop>, query: &ShopQuery) -> Vec<LocatedShop> {
    let search = query.search.to_lowercase();

    let mut located: Vec<LocatedShop> = shops
        .into_iter()
        .map(|shop| {
            let distance_km = match (query.viewer, shop.location) {
                (Some(viewer), Some(at)) => Some(haversine_distance(&viewer, &at)),
                _ => None,
            };
            LocatedShop { shop, distance_km }
        })
        .filter(|entry| {
            search.is_empty()
                || entry.shop.name.to_lowercase().contains(&search)
                || entry.shop.address.to_lowercase().contains(&search)
        })
        .filter(|entry| match &query.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => entry.shop.category == *category,
        })
        .collect();

    if query.sort_by_distance && query.viewer.is_some() {
        located.sort_by(|a, b| match (a.distance_km, b.distance_km) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }

    located
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pricelens_core::{ShopId, UserId};

    fn shop(name: &str, category: &str, location: Option<Coordinate>) -> Shop {
        Shop {
            id: ShopId::generate(),
            owner_id: UserId::generate(),
            name: name.to_owned(),
            address: format!("{name} Road, Supela"),
            contact: "9876543210".to_owned(),
            category: category.to_owned(),
            rating: 4.0,
            location,
            created_at: Utc::now(),
        }
    }

    fn names(located: &[LocatedShop]) -> Vec<&str> {
        located.iter().map(|e| e.shop.name.as_str()).collect()
    }

    #[test]
    fn test_empty_search_keeps_all_in_order() {
        let shops = vec![
            shop("Gamma", "Mobile", None),
            shop("Alpha", "Mobile", None),
            shop("Beta", "Accessories", None),
        ];
        let located = locate(shops, &ShopQuery::default());
        assert_eq!(names(&located), ["Gamma", "Alpha", "Beta"]);
    }

    #[test]
    fn test_text_filter_matches_name_or_address_case_insensitive() {
        let shops = vec![
            shop("Alpha Mobiles", "Mobile", None),
            shop("Beta Store", "Accessories", None),
        ];

        let query = ShopQuery {
            search: "ALPHA".to_owned(),
            ..Default::default()
        };
        let by_name = locate(shops.clone(), &query);
        assert_eq!(names(&by_name), ["Alpha Mobiles"]);

        // Address also matches ("Beta Store Road, Supela").
        let query = ShopQuery {
            search: "beta store road".to_owned(),
            ..Default::default()
        };
        let by_address = locate(shops, &query);
        assert_eq!(names(&by_address), ["Beta Store"]);
    }

    #[test]
    fn test_category_all_sentinel_is_identity() {
        let shops = vec![
            shop("Alpha", "Mobile", None),
            shop("Beta", "Accessories", None),
        ];
        let query = ShopQuery {
            category: CategoryFilter::parse("all"),
            ..Default::default()
        };
        assert_eq!(names(&locate(shops, &query)), ["Alpha", "Beta"]);
    }

    #[test]
    fn test_category_filter_exact_match() {
        let shops = vec![
            shop("Alpha", "Mobile", None),
            shop("Beta", "Accessories", None),
        ];
        let query = ShopQuery {
            category: CategoryFilter::Only("Accessories".to_owned()),
            ..Default::default()
        };
        assert_eq!(names(&locate(shops, &query)), ["Beta"]);
    }

    #[test]
    fn test_category_filter_is_case_sensitive() {
        let shops = vec![shop("Alpha", "Mobile", None)];
        let query = ShopQuery {
            category: CategoryFilter::Only("mobile".to_owned()),
            ..Default::default()
        };
        assert!(locate(shops, &query).is_empty());
    }

    #[test]
    fn test_distance_sort_inert_without_viewer_location() {
        let shops = vec![
            shop("Far", "Mobile", Some(Coordinate::new(22.0, 82.0))),
            shop("Near", "Mobile", Some(Coordinate::new(21.2, 81.35))),
        ];
        let query = ShopQuery {
            sort_by_distance: true,
            viewer: None,
            ..Default::default()
        };
        let located = locate(shops, &query);
        assert_eq!(names(&located), ["Far", "Near"]);
        assert!(located.iter().all(|e| e.distance_km.is_none()));
    }

    #[test]
    fn test_distance_sort_nearest_first() {
        // Viewer stands at Alpha's door; Beta is about 1.5 km away.
        let shops = vec![
            shop("Beta Store", "Accessories", Some(Coordinate::new(21.19, 81.34))),
            shop("Alpha Mobiles", "Mobile", Some(Coordinate::new(21.20, 81.35))),
        ];
        let query = ShopQuery {
            viewer: Some(Coordinate::new(21.20, 81.35)),
            sort_by_distance: true,
            ..Default::default()
        };
        let located = locate(shops, &query);
        assert_eq!(names(&located), ["Alpha Mobiles", "Beta Store"]);
        assert!(located[0].distance_km.is_some_and(|d| d.abs() < 0.001));
        assert!(located[1].distance_km.is_some_and(|d| d > 0.0));
    }

    #[test]
    fn test_shops_without_coordinates_sort_last_in_original_order() {
        let shops = vec![
            shop("NoLoc One", "Mobile", None),
            shop("Near", "Mobile", Some(Coordinate::new(21.2, 81.35))),
            shop("NoLoc Two", "Mobile", None),
        ];
        let query = ShopQuery {
            viewer: Some(Coordinate::new(21.2, 81.35)),
            sort_by_distance: true,
            ..Default::default()
        };
        let located = locate(shops, &query);
        assert_eq!(names(&located), ["Near", "NoLoc One", "NoLoc Two"]);
    }

    #[test]
    fn test_annotation_without_sorting() {
        let shops = vec![
            shop("Far", "Mobile", Some(Coordinate::new(22.0, 82.0))),
            shop("Near", "Mobile", Some(Coordinate::new(21.2, 81.35))),
        ];
        let query = ShopQuery {
            viewer: Some(Coordinate::new(21.2, 81.35)),
            sort_by_distance: false,
            ..Default::default()
        };
        let located = locate(shops, &query);
        // Fetch order preserved, distances still attached for display.
        assert_eq!(names(&located), ["Far", "Near"]);
        assert!(located.iter().all(|e| e.distance_km.is_some()));
    }

    #[test]
    fn test_pipeline_is_idempotent_per_request() {
        let shops = vec![
            shop("Alpha", "Mobile", Some(Coordinate::new(21.2, 81.35))),
            shop("Beta", "Accessories", None),
        ];
        let query = ShopQuery {
            search: "a".to_owned(),
            viewer: Some(Coordinate::new(21.2, 81.35)),
            sort_by_distance: true,
            ..Default::default()
        };
        let first = locate(shops.clone(), &query);
        let second = locate(shops, &query);
        assert_eq!(names(&first), names(&second));
    }
}
