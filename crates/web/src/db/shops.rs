//! Shop repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use pricelens_core::{Coordinate, ShopId, UserId};

use super::RepositoryError;
use crate::models::Shop;

/// Raw shop row as stored; latitude/longitude are split columns.
#[derive(sqlx::FromRow)]
struct ShopRow {
    id: ShopId,
    owner_id: UserId,
    name: String,
    address: String,
    contact: String,
    category: String,
    rating: f64,
    latitude: Option<f64>,
    longitude: Option<f64>,
    created_at: DateTime<Utc>,
}

impl ShopRow {
    fn into_domain(self) -> Result<Shop, RepositoryError> {
        // A shop either has a resolved location or none; a half-present pair
        // means the row bypassed the schema CHECK somehow.
        let location = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            (None, None) => None,
            _ => {
                return Err(RepositoryError::DataCorruption(format!(
                    "shop {} has a partial coordinate pair",
                    self.id
                )));
            }
        };

        Ok(Shop {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            address: self.address,
            contact: self.contact,
            category: self.category,
            rating: self.rating,
            location,
            created_at: self.created_at,
        })
    }
}

/// Fields accepted when creating or updating a shop.
#[derive(Debug, Clone)]
pub struct ShopInput {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub category: String,
    pub location: Option<Coordinate>,
}

/// Repository for shop database operations.
pub struct ShopRepository<'a> {
    pool: &'a PgPool,
}

const SHOP_COLUMNS: &str = "id, owner_id, name, address, contact, category, \
                            rating, latitude, longitude, created_at";

impl<'a> ShopRepository<'a> {
    /// Create a new shop repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all shops, most recently created first.
    ///
    /// This is the fetch order the locator pipeline preserves when the
    /// distance sort is off.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Shop>, RepositoryError> {
        let rows: Vec<ShopRow> = sqlx::query_as(&format!(
            "SELECT {SHOP_COLUMNS} FROM pricelens.shops ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ShopRow::into_domain).collect()
    }

    /// List the distinct shop categories (for the filter dropdown).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<String>, RepositoryError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT category FROM pricelens.shops ORDER BY category")
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(|(category,)| category).collect())
    }

    /// Get a shop by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ShopId) -> Result<Option<Shop>, RepositoryError> {
        let row: Option<ShopRow> = sqlx::query_as(&format!(
            "SELECT {SHOP_COLUMNS} FROM pricelens.shops WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(ShopRow::into_domain).transpose()
    }

    /// Get the shop owned by a shopkeeper account, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_owner(&self, owner_id: UserId) -> Result<Option<Shop>, RepositoryError> {
        let row: Option<ShopRow> = sqlx::query_as(&format!(
            "SELECT {SHOP_COLUMNS} FROM pricelens.shops WHERE owner_id = $1"
        ))
        .bind(owner_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(ShopRow::into_domain).transpose()
    }

    /// Create a shop for a shopkeeper account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the account already owns a shop.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        owner_id: UserId,
        input: &ShopInput,
    ) -> Result<Shop, RepositoryError> {
        let row: ShopRow = sqlx::query_as(&format!(
            "INSERT INTO pricelens.shops
                 (owner_id, name, address, contact, category, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {SHOP_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.contact)
        .bind(&input.category)
        .bind(input.location.map(|c| c.latitude))
        .bind(input.location.map(|c| c.longitude))
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(
                    "this account already owns a shop".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?;

        row.into_domain()
    }

    /// Update the shop owned by a shopkeeper account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account owns no shop.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_for_owner(
        &self,
        owner_id: UserId,
        input: &ShopInput,
    ) -> Result<Shop, RepositoryError> {
        let row: Option<ShopRow> = sqlx::query_as(&format!(
            "UPDATE pricelens.shops
             SET name = $2, address = $3, contact = $4, category = $5,
                 latitude = $6, longitude = $7
             WHERE owner_id = $1
             RETURNING {SHOP_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.contact)
        .bind(&input.category)
        .bind(input.location.map(|c| c.latitude))
        .bind(input.location.map(|c| c.longitude))
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.into_domain()
    }
}
