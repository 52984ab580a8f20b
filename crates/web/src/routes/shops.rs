//! Shop locator and detail route handlers.
//!
//! The locator page recomputes the full filter pipeline (`catalog::locate`)
//! on every request: the browser reports the viewer's geolocation back as
//! `lat`/`lon` query parameters, so a request always carries a consistent
//! snapshot of search text, category, location, and sort toggle.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use pricelens_core::{Coordinate, ShopId};

use crate::catalog::{CategoryFilter, LocatedShop, ShopQuery, locate};
use crate::db::{ProductRepository, ShopRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, Product, Shop};
use crate::routes::empty_string_as_none;
use crate::state::AppState;

/// Query string for the locator page. `sort=distance` enables the toggle.
#[derive(Debug, Deserialize)]
pub struct ShopsPageQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sort: String,
    /// Viewer latitude, reported by the browser's geolocation callback.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub lat: Option<f64>,
    /// Viewer longitude.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub lon: Option<f64>,
}

/// Shop locator page template.
#[derive(Template, WebTemplate)]
#[template(path = "shops/index.html")]
pub struct ShopsIndexTemplate {
    pub user: Option<CurrentUser>,
    pub shops: Vec<LocatedShop>,
    pub categories: Vec<String>,
    pub query: String,
    pub category: String,
    /// The raw `sort=distance` request, regardless of whether a viewer
    /// location arrived with it. Drives the toggle state and the
    /// location-access notice; the actual sort stays gated on the location.
    pub sort_requested: bool,
    pub has_location: bool,
    /// True when the store has no shops at all, as opposed to none matching.
    pub no_shops_registered: bool,
    /// Marker data for the map, derived from the located list.
    pub markers_json: String,
    pub map_center_lat: f64,
    pub map_center_lon: f64,
}

/// Shop detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "shops/show.html")]
pub struct ShopShowTemplate {
    pub user: Option<CurrentUser>,
    pub shop: Shop,
    pub products: Vec<Product>,
}

/// One map marker, serialized for the client-side map library.
#[derive(serde::Serialize)]
struct Marker {
    id: ShopId,
    lat: f64,
    lon: f64,
    label: String,
    category: String,
    address: String,
}

/// Display the shop locator page.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(params): Query<ShopsPageQuery>,
) -> Result<impl IntoResponse> {
    let repo = ShopRepository::new(state.pool());
    let all_shops = repo.list_all().await?;
    let categories = repo.list_categories().await?;
    let no_shops_registered = all_shops.is_empty();

    let viewer = match (params.lat, params.lon) {
        (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
        _ => None,
    };

    // The distance sort is inert without a resolved viewer location; the
    // raw request flag still reaches the template so it can surface why.
    let sort_requested = params.sort == "distance";
    let query = ShopQuery {
        search: params.q.trim().to_owned(),
        category: CategoryFilter::parse(&params.category),
        viewer,
        sort_by_distance: sort_requested && viewer.is_some(),
    };

    let shops = locate(all_shops, &query);

    // Map markers consume the already-located list; the map never re-derives
    // any filtering.
    let markers: Vec<Marker> = shops
        .iter()
        .filter_map(|entry| {
            entry.shop.location.map(|at| Marker {
                id: entry.shop.id,
                lat: at.latitude,
                lon: at.longitude,
                label: entry.shop.name.clone(),
                category: entry.shop.category.clone(),
                address: entry.shop.address.clone(),
            })
        })
        .collect();
    let markers_json = serde_json::to_string(&markers)
        .map_err(|e| AppError::Internal(format!("marker serialization failed: {e}")))?;

    let center = viewer.unwrap_or(state.config().map_center);

    Ok(ShopsIndexTemplate {
        user,
        shops,
        categories,
        query: params.q,
        category: if params.category.is_empty() {
            CategoryFilter::ALL.to_owned()
        } else {
            params.category
        },
        sort_requested,
        has_location: viewer.is_some(),
        no_shops_registered,
        markers_json,
        map_center_lat: center.latitude,
        map_center_lon: center.longitude,
    })
}

/// Display a shop's detail page with its products, newest first.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<ShopId>,
) -> Result<impl IntoResponse> {
    let shop = ShopRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shop {id}")))?;

    let products = ProductRepository::new(state.pool())
        .list_by_shop(shop.id)
        .await?;

    Ok(ShopShowTemplate {
        user,
        shop,
        products,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn index_template() -> ShopsIndexTemplate {
        ShopsIndexTemplate {
            user: None,
            shops: Vec::new(),
            categories: vec!["Electronics".to_owned(), "Grocery".to_owned()],
            query: String::new(),
            category: CategoryFilter::ALL.to_owned(),
            sort_requested: false,
            has_location: false,
            no_shops_registered: false,
            markers_json: "[]".to_owned(),
            map_center_lat: 21.2,
            map_center_lon: 81.3,
        }
    }

    #[test]
    fn test_selected_category_marks_its_option() {
        let template = ShopsIndexTemplate {
            category: "Grocery".to_owned(),
            ..index_template()
        };
        let html = template.render().unwrap();
        assert!(html.contains(r#"<option value="Grocery" selected>"#));
        assert!(!html.contains(r#"<option value="Electronics" selected>"#));
    }

    #[test]
    fn test_location_notice_shown_when_sort_requested_without_location() {
        let template = ShopsIndexTemplate {
            sort_requested: true,
            has_location: false,
            ..index_template()
        };
        let html = template.render().unwrap();
        assert!(html.contains("Allow location access"));
        // The toggle reflects the request even though the sort stayed inert.
        assert!(html.contains("checked"));
    }

    #[test]
    fn test_location_notice_absent_with_resolved_location() {
        let template = ShopsIndexTemplate {
            sort_requested: true,
            has_location: true,
            ..index_template()
        };
        let html = template.render().unwrap();
        assert!(!html.contains("Allow location access"));
    }
}
