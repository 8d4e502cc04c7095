//! Banking product service.
//!
//! `features` is stored as a JSONB string array; a malformed stored
//! value reads as an empty list rather than failing the whole row.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use models::{Product, ProductInput};

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("product not found: {0}")]
    NotFound(Uuid),
    #[error("{0}")]
    Validation(#[from] models::ValidationError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

const PRODUCT_COLUMNS: &str = "id, name, summary, description, category, rate_info, features, image_url, \
                               is_featured, is_active, position, created_at, updated_at";

pub(crate) fn json_string_array(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_owned)).collect())
        .unwrap_or_default()
}

fn row_to_product(r: &PgRow) -> Product {
    Product {
        id: r.get("id"),
        name: r.get("name"),
        summary: r.get("summary"),
        description: r.get("description"),
        category: r.get("category"),
        rate_info: r.get("rate_info"),
        features: json_string_array(&r.get::<serde_json::Value, _>("features")),
        image_url: r.get("image_url"),
        is_featured: r.get("is_featured"),
        is_active: r.get("is_active"),
        position: r.get("position"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

fn check_input(input: &ProductInput) -> Result<(), ProductError> {
    if input.name.trim().is_empty() {
        return Err(models::ValidationError::field("name", "must not be empty").into());
    }
    if input.category.trim().is_empty() {
        return Err(models::ValidationError::field("category", "must not be empty").into());
    }
    Ok(())
}

/// All products for the admin panel, grouped by category then position.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<Product>, ProductError> {
    let rows = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY category, position, created_at"))
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(row_to_product).collect())
}

/// Fetch one product by id.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn get(pool: &PgPool, id: Uuid) -> Result<Product, ProductError> {
    let row = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(row_to_product).ok_or(ProductError::NotFound(id))
}

/// Create a product, active by default.
///
/// # Errors
///
/// Validation errors for bad payloads, otherwise database errors.
pub async fn create(pool: &PgPool, input: &ProductInput, now: OffsetDateTime) -> Result<Product, ProductError> {
    check_input(input)?;
    let id = Uuid::new_v4();

    let row = sqlx::query(&format!(
        "INSERT INTO products (id, name, summary, description, category, rate_info, features, image_url,
                               is_featured, position, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9,
                 (SELECT COALESCE(MAX(position), -1) + 1 FROM products), $10, $10)
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(id)
    .bind(input.name.trim())
    .bind(input.summary.trim())
    .bind(&input.description)
    .bind(input.category.trim())
    .bind(&input.rate_info)
    .bind(serde_json::json!(input.features))
    .bind(&input.image_url)
    .bind(input.is_featured.unwrap_or(false))
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row_to_product(&row))
}

/// Replace a product's editable fields.
///
/// # Errors
///
/// `NotFound` for an unknown id, validation errors for bad payloads,
/// otherwise database errors.
pub async fn update(pool: &PgPool, id: Uuid, input: &ProductInput, now: OffsetDateTime) -> Result<Product, ProductError> {
    check_input(input)?;
    let row = sqlx::query(&format!(
        "UPDATE products
         SET name = $2, summary = $3, description = $4, category = $5, rate_info = $6,
             features = $7, image_url = $8, is_featured = $9, updated_at = $10
         WHERE id = $1
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(id)
    .bind(input.name.trim())
    .bind(input.summary.trim())
    .bind(&input.description)
    .bind(input.category.trim())
    .bind(&input.rate_info)
    .bind(serde_json::json!(input.features))
    .bind(&input.image_url)
    .bind(input.is_featured.unwrap_or(false))
    .bind(now)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(row_to_product).ok_or(ProductError::NotFound(id))
}

/// Delete a product.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ProductError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1").bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(ProductError::NotFound(id));
    }
    Ok(())
}

/// Flip a product's featured flag.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn toggle_featured(pool: &PgPool, id: Uuid, now: OffsetDateTime) -> Result<Product, ProductError> {
    let row = sqlx::query(&format!(
        "UPDATE products SET is_featured = NOT is_featured, updated_at = $2 WHERE id = $1
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(id)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(row_to_product).ok_or(ProductError::NotFound(id))
}

// =============================================================================
// PUBLIC READS
// =============================================================================

/// Active products for the public grid, optionally narrowed to a category.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_active(pool: &PgPool, category: Option<&str>) -> Result<Vec<Product>, ProductError> {
    let rows = match category.map(str::trim).filter(|c| !c.is_empty()) {
        Some(category) => {
            sqlx::query(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active AND category = $1
                 ORDER BY position, created_at"
            ))
            .bind(category)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active ORDER BY category, position, created_at"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    Ok(rows.iter().map(row_to_product).collect())
}

/// Active featured products for the landing page.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_featured(pool: &PgPool) -> Result<Vec<Product>, ProductError> {
    let rows = sqlx::query(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active AND is_featured ORDER BY position, created_at"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_product).collect())
}

/// Active products matching a search term, for the public search box.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub(crate) async fn search(pool: &PgPool, term: &str, limit: i64) -> Result<Vec<Product>, ProductError> {
    let pattern = format!("%{term}%");
    let rows = sqlx::query(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products
         WHERE is_active AND (name ILIKE $1 OR summary ILIKE $1 OR description ILIKE $1)
         ORDER BY position, created_at
         LIMIT $2"
    ))
    .bind(&pattern)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_product).collect())
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
