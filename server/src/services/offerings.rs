//! Service offering service: advisory, transfers, safe deposit, and the
//! rest of the non-product catalogue shown on the public services page.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use models::{ServiceOffering, ServiceOfferingInput};

use crate::services::products::json_string_array;

#[derive(Debug, thiserror::Error)]
pub enum OfferingError {
    #[error("offering not found: {0}")]
    NotFound(Uuid),
    #[error("{0}")]
    Validation(#[from] models::ValidationError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

const OFFERING_COLUMNS: &str = "id, name, summary, description, icon, requirements, is_featured, is_active, \
                                position, created_at, updated_at";

fn row_to_offering(r: &PgRow) -> ServiceOffering {
    ServiceOffering {
        id: r.get("id"),
        name: r.get("name"),
        summary: r.get("summary"),
        description: r.get("description"),
        icon: r.get("icon"),
        requirements: json_string_array(&r.get::<serde_json::Value, _>("requirements")),
        is_featured: r.get("is_featured"),
        is_active: r.get("is_active"),
        position: r.get("position"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

fn check_input(input: &ServiceOfferingInput) -> Result<(), OfferingError> {
    if input.name.trim().is_empty() {
        return Err(models::ValidationError::field("name", "must not be empty").into());
    }
    Ok(())
}

/// All offerings for the admin panel, in display order.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<ServiceOffering>, OfferingError> {
    let rows = sqlx::query(&format!("SELECT {OFFERING_COLUMNS} FROM service_offerings ORDER BY position, created_at"))
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(row_to_offering).collect())
}

/// Fetch one offering by id.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn get(pool: &PgPool, id: Uuid) -> Result<ServiceOffering, OfferingError> {
    let row = sqlx::query(&format!("SELECT {OFFERING_COLUMNS} FROM service_offerings WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(row_to_offering).ok_or(OfferingError::NotFound(id))
}

/// Create an offering at the end of the display order, active by default.
///
/// # Errors
///
/// Validation errors for bad payloads, otherwise database errors.
pub async fn create(
    pool: &PgPool,
    input: &ServiceOfferingInput,
    now: OffsetDateTime,
) -> Result<ServiceOffering, OfferingError> {
    check_input(input)?;
    let id = Uuid::new_v4();

    let row = sqlx::query(&format!(
        "INSERT INTO service_offerings (id, name, summary, description, icon, requirements, is_featured,
                                        position, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7,
                 (SELECT COALESCE(MAX(position), -1) + 1 FROM service_offerings), $8, $8)
         RETURNING {OFFERING_COLUMNS}"
    ))
    .bind(id)
    .bind(input.name.trim())
    .bind(input.summary.trim())
    .bind(&input.description)
    .bind(&input.icon)
    .bind(serde_json::json!(input.requirements))
    .bind(input.is_featured.unwrap_or(false))
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row_to_offering(&row))
}

/// Replace an offering's editable fields.
///
/// # Errors
///
/// `NotFound` for an unknown id, validation errors for bad payloads,
/// otherwise database errors.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &ServiceOfferingInput,
    now: OffsetDateTime,
) -> Result<ServiceOffering, OfferingError> {
    check_input(input)?;
    let row = sqlx::query(&format!(
        "UPDATE service_offerings
         SET name = $2, summary = $3, description = $4, icon = $5, requirements = $6,
             is_featured = $7, updated_at = $8
         WHERE id = $1
         RETURNING {OFFERING_COLUMNS}"
    ))
    .bind(id)
    .bind(input.name.trim())
    .bind(input.summary.trim())
    .bind(&input.description)
    .bind(&input.icon)
    .bind(serde_json::json!(input.requirements))
    .bind(input.is_featured.unwrap_or(false))
    .bind(now)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(row_to_offering).ok_or(OfferingError::NotFound(id))
}

/// Delete an offering.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), OfferingError> {
    let result = sqlx::query("DELETE FROM service_offerings WHERE id = $1").bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(OfferingError::NotFound(id));
    }
    Ok(())
}

// =============================================================================
// PUBLIC READS
// =============================================================================

/// Active offerings for the public services page.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_active(pool: &PgPool) -> Result<Vec<ServiceOffering>, OfferingError> {
    let rows = sqlx::query(&format!(
        "SELECT {OFFERING_COLUMNS} FROM service_offerings WHERE is_active ORDER BY position, created_at"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_offering).collect())
}

/// Active featured offerings for the landing page.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_featured(pool: &PgPool) -> Result<Vec<ServiceOffering>, OfferingError> {
    let rows = sqlx::query(&format!(
        "SELECT {OFFERING_COLUMNS} FROM service_offerings WHERE is_active AND is_featured
         ORDER BY position, created_at"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_offering).collect())
}

/// Active offerings matching a search term, for the public search box.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub(crate) async fn search(pool: &PgPool, term: &str, limit: i64) -> Result<Vec<ServiceOffering>, OfferingError> {
    let pattern = format!("%{term}%");
    let rows = sqlx::query(&format!(
        "SELECT {OFFERING_COLUMNS} FROM service_offerings
         WHERE is_active AND (name ILIKE $1 OR summary ILIKE $1 OR description ILIKE $1)
         ORDER BY position, created_at
         LIMIT $2"
    ))
    .bind(&pattern)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_offering).collect())
}
