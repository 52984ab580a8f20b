//! Product repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use pricelens_core::{Coordinate, Price, ProductId, ShopId};

use super::RepositoryError;
use crate::models::{Product, ProductOffer};

/// Raw product row as stored.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    shop_id: ShopId,
    name: String,
    category: String,
    price: Price,
    description: Option<String>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            shop_id: row.shop_id,
            name: row.name,
            category: row.category,
            price: row.price,
            description: row.description,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

/// Product joined with its owning shop for the compare view.
#[derive(sqlx::FromRow)]
struct OfferRow {
    id: ProductId,
    name: String,
    category: String,
    price: Price,
    shop_id: ShopId,
    shop_name: String,
    shop_address: String,
    shop_latitude: Option<f64>,
    shop_longitude: Option<f64>,
}

impl OfferRow {
    fn into_domain(self) -> Result<ProductOffer, RepositoryError> {
        let shop_location = match (self.shop_latitude, self.shop_longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            (None, None) => None,
            _ => {
                return Err(RepositoryError::DataCorruption(format!(
                    "shop {} has a partial coordinate pair",
                    self.shop_id
                )));
            }
        };

        Ok(ProductOffer {
            id: self.id,
            name: self.name,
            category: self.category,
            price: self.price,
            shop_id: self.shop_id,
            shop_name: self.shop_name,
            shop_address: self.shop_address,
            shop_location,
        })
    }
}

/// Fields accepted when creating or updating a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub price: Price,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

const PRODUCT_COLUMNS: &str =
    "id, shop_id, name, category, price, description, image_url, created_at";

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM pricelens.products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// List a shop's products, most recently listed first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_shop(&self, shop_id: ShopId) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM pricelens.products
             WHERE shop_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(shop_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Search products across all shops by case-insensitive name substring,
    /// joined with the owning shop, ascending by price.
    ///
    /// The ascending price order here is the input order the compare ranking
    /// relies on; ties keep this fetch order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search_offers(&self, name_query: &str) -> Result<Vec<ProductOffer>, RepositoryError> {
        let rows: Vec<OfferRow> = sqlx::query_as(
            r"
            SELECT p.id, p.name, p.category, p.price,
                   p.shop_id,
                   s.name AS shop_name,
                   s.address AS shop_address,
                   s.latitude AS shop_latitude,
                   s.longitude AS shop_longitude
            FROM pricelens.products p
            JOIN pricelens.shops s ON s.id = p.shop_id
            WHERE p.name ILIKE '%' || $1 || '%'
            ORDER BY p.price ASC
            ",
        )
        .bind(name_query)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OfferRow::into_domain).collect()
    }

    /// Create a product under a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        shop_id: ShopId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let row: ProductRow = sqlx::query_as(&format!(
            "INSERT INTO pricelens.products
                 (shop_id, name, category, price, description, image_url)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(shop_id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.price)
        .bind(&input.description)
        .bind(&input.image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such product exists.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "UPDATE pricelens.products
             SET name = $2, category = $3, price = $4, description = $5, image_url = $6
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.price)
        .bind(&input.description)
        .bind(&input.image_url)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::from).ok_or(RepositoryError::NotFound)
    }

    /// Delete a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such product exists.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM pricelens.products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
