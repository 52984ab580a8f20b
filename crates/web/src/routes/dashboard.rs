//! Shopkeeper dashboard route handlers.
//!
//! Every handler requires a logged-in shopkeeper. A shopkeeper account
//! manages exactly one shop; product operations are scoped to that shop
//! and reject attempts to touch another shop's catalog.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;

use pricelens_core::{Coordinate, Price, ProductId};

use crate::db::{ProductInput, ProductRepository, ShopInput, ShopRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireShopkeeper;
use crate::models::{CurrentUser, Product, Shop};
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate {
    pub user: Option<CurrentUser>,
    pub shop: Option<Shop>,
    pub products: Vec<Product>,
}

/// Shop create/update form fields.
#[derive(Debug, Deserialize)]
pub struct ShopForm {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub category: String,
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub longitude: Option<f64>,
}

/// Product create/update form fields.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub price: String,
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub image_url: Option<String>,
}

impl ShopForm {
    /// Validate the form into repository input.
    ///
    /// Coordinates must be supplied as a pair or not at all.
    fn into_input(self) -> Result<ShopInput> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(AppError::BadRequest("shop name is required".into()));
        }
        let address = self.address.trim().to_owned();
        if address.is_empty() {
            return Err(AppError::BadRequest("shop address is required".into()));
        }
        let category = self.category.trim().to_owned();
        if category.is_empty() {
            return Err(AppError::BadRequest("shop category is required".into()));
        }

        let location = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            (None, None) => None,
            _ => {
                return Err(AppError::BadRequest(
                    "latitude and longitude must be provided together".into(),
                ));
            }
        };

        Ok(ShopInput {
            name,
            address,
            contact: self.contact.trim().to_owned(),
            category,
            location,
        })
    }
}

impl ProductForm {
    fn into_input(self) -> Result<ProductInput> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(AppError::BadRequest("product name is required".into()));
        }
        let category = self.category.trim().to_owned();
        if category.is_empty() {
            return Err(AppError::BadRequest("product category is required".into()));
        }

        let amount = self
            .price
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest("price must be a number".into()))?;
        let price = Price::new(amount)
            .map_err(|_| AppError::BadRequest("price cannot be negative".into()))?;

        Ok(ProductInput {
            name,
            category,
            price,
            description: self.description,
            image_url: self.image_url,
        })
    }
}

/// Display the dashboard with the keeper's shop and its products.
pub async fn index(
    State(state): State<AppState>,
    RequireShopkeeper(current): RequireShopkeeper,
) -> Result<impl IntoResponse> {
    let shops = ShopRepository::new(state.pool());
    let shop = shops.get_by_owner(current.id).await?;

    let products = match &shop {
        Some(shop) => ProductRepository::new(state.pool()).list_by_shop(shop.id).await?,
        None => Vec::new(),
    };

    Ok(DashboardTemplate {
        user: Some(current),
        shop,
        products,
    })
}

/// Create the keeper's shop, or update it if one already exists.
pub async fn save_shop(
    State(state): State<AppState>,
    RequireShopkeeper(current): RequireShopkeeper,
    Form(form): Form<ShopForm>,
) -> Result<impl IntoResponse> {
    let input = form.into_input()?;
    let shops = ShopRepository::new(state.pool());

    if shops.get_by_owner(current.id).await?.is_some() {
        shops.update_for_owner(current.id, &input).await?;
        tracing::info!(user_id = %current.id, "shop updated");
    } else {
        let shop = shops.create(current.id, &input).await?;
        tracing::info!(user_id = %current.id, shop_id = %shop.id, "shop created");
    }

    Ok(Redirect::to("/dashboard"))
}

/// Add a product to the keeper's shop.
pub async fn create_product(
    State(state): State<AppState>,
    RequireShopkeeper(current): RequireShopkeeper,
    Form(form): Form<ProductForm>,
) -> Result<impl IntoResponse> {
    let input = form.into_input()?;

    let shop = ShopRepository::new(state.pool())
        .get_by_owner(current.id)
        .await?
        .ok_or_else(|| AppError::BadRequest("register a shop before adding products".into()))?;

    let product = ProductRepository::new(state.pool())
        .create(shop.id, &input)
        .await?;
    tracing::info!(shop_id = %shop.id, product_id = %product.id, "product created");

    Ok(Redirect::to("/dashboard"))
}

/// Update a product in the keeper's shop.
pub async fn update_product(
    State(state): State<AppState>,
    RequireShopkeeper(current): RequireShopkeeper,
    Path(product_id): Path<ProductId>,
    Form(form): Form<ProductForm>,
) -> Result<impl IntoResponse> {
    let input = form.into_input()?;
    let products = ProductRepository::new(state.pool());

    let product = owned_product(&state, &current, &products, product_id).await?;
    products.update(product.id, &input).await?;
    tracing::info!(product_id = %product.id, "product updated");

    Ok(Redirect::to("/dashboard"))
}

/// Remove a product from the keeper's shop.
pub async fn delete_product(
    State(state): State<AppState>,
    RequireShopkeeper(current): RequireShopkeeper,
    Path(product_id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let products = ProductRepository::new(state.pool());

    let product = owned_product(&state, &current, &products, product_id).await?;
    products.delete(product.id).await?;
    tracing::info!(product_id = %product.id, "product deleted");

    Ok(Redirect::to("/dashboard"))
}

/// Fetch a product and verify it belongs to the current keeper's shop.
async fn owned_product(
    state: &AppState,
    current: &CurrentUser,
    products: &ProductRepository<'_>,
    product_id: ProductId,
) -> Result<Product> {
    let product = products
        .get(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let shop = ShopRepository::new(state.pool())
        .get_by_owner(current.id)
        .await?
        .ok_or_else(|| AppError::NotFound("no shop registered for this account".to_owned()))?;

    if product.shop_id != shop.id {
        return Err(AppError::Forbidden(
            "product belongs to a different shop".to_owned(),
        ));
    }

    Ok(product)
}
