//! Hero banner service: the rotating carousel on the public landing page.
//!
//! DESIGN
//! ======
//! Banners carry an explicit `position`; new banners append after the
//! current maximum, and the reorder operation rewrites positions from a
//! full id list so the admin drag-and-drop stays authoritative.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use models::{HeroBanner, HeroBannerInput};

#[derive(Debug, thiserror::Error)]
pub enum BannerError {
    #[error("banner not found: {0}")]
    NotFound(Uuid),
    #[error("{0}")]
    Validation(#[from] models::ValidationError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

const BANNER_COLUMNS: &str =
    "id, title, subtitle, description, button_text, button_link, image_url, is_active, position, created_at, updated_at";

fn row_to_banner(r: &PgRow) -> HeroBanner {
    HeroBanner {
        id: r.get("id"),
        title: r.get("title"),
        subtitle: r.get("subtitle"),
        description: r.get("description"),
        button_text: r.get("button_text"),
        button_link: r.get("button_link"),
        image_url: r.get("image_url"),
        is_active: r.get("is_active"),
        position: r.get("position"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

fn check_input(input: &HeroBannerInput) -> Result<(), BannerError> {
    if input.title.trim().is_empty() {
        return Err(models::ValidationError::field("title", "must not be empty").into());
    }
    Ok(())
}

/// All banners for the admin panel, in carousel order.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<HeroBanner>, BannerError> {
    let rows = sqlx::query(&format!("SELECT {BANNER_COLUMNS} FROM hero_banners ORDER BY position, created_at"))
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(row_to_banner).collect())
}

/// Fetch one banner by id.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn get(pool: &PgPool, id: Uuid) -> Result<HeroBanner, BannerError> {
    let row = sqlx::query(&format!("SELECT {BANNER_COLUMNS} FROM hero_banners WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(row_to_banner).ok_or(BannerError::NotFound(id))
}

/// Create a banner at the end of the carousel, active by default.
///
/// # Errors
///
/// Validation errors for bad payloads, otherwise database errors.
pub async fn create(pool: &PgPool, input: &HeroBannerInput, now: OffsetDateTime) -> Result<HeroBanner, BannerError> {
    check_input(input)?;
    let id = Uuid::new_v4();

    let row = sqlx::query(&format!(
        "INSERT INTO hero_banners (id, title, subtitle, description, button_text, button_link, image_url,
                                   position, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7,
                 (SELECT COALESCE(MAX(position), -1) + 1 FROM hero_banners), $8, $8)
         RETURNING {BANNER_COLUMNS}"
    ))
    .bind(id)
    .bind(input.title.trim())
    .bind(&input.subtitle)
    .bind(&input.description)
    .bind(&input.button_text)
    .bind(&input.button_link)
    .bind(&input.image_url)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row_to_banner(&row))
}

/// Replace a banner's editable fields.
///
/// # Errors
///
/// `NotFound` for an unknown id, validation errors for bad payloads,
/// otherwise database errors.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &HeroBannerInput,
    now: OffsetDateTime,
) -> Result<HeroBanner, BannerError> {
    check_input(input)?;
    let row = sqlx::query(&format!(
        "UPDATE hero_banners
         SET title = $2, subtitle = $3, description = $4, button_text = $5, button_link = $6,
             image_url = $7, updated_at = $8
         WHERE id = $1
         RETURNING {BANNER_COLUMNS}"
    ))
    .bind(id)
    .bind(input.title.trim())
    .bind(&input.subtitle)
    .bind(&input.description)
    .bind(&input.button_text)
    .bind(&input.button_link)
    .bind(&input.image_url)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(row_to_banner).ok_or(BannerError::NotFound(id))
}

/// Delete a banner.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), BannerError> {
    let result = sqlx::query("DELETE FROM hero_banners WHERE id = $1").bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(BannerError::NotFound(id));
    }
    Ok(())
}

/// Flip a banner in or out of the carousel.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn toggle_active(pool: &PgPool, id: Uuid, now: OffsetDateTime) -> Result<HeroBanner, BannerError> {
    let row = sqlx::query(&format!(
        "UPDATE hero_banners SET is_active = NOT is_active, updated_at = $2 WHERE id = $1
         RETURNING {BANNER_COLUMNS}"
    ))
    .bind(id)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(row_to_banner).ok_or(BannerError::NotFound(id))
}

/// Rewrite carousel positions from an explicit id ordering. Ids missing
/// from the list keep their rows but sort after the listed ones.
///
/// # Errors
///
/// Returns a database error if any statement or the commit fails.
pub async fn reorder(pool: &PgPool, ids: &[Uuid], now: OffsetDateTime) -> Result<Vec<HeroBanner>, BannerError> {
    let mut tx = pool.begin().await?;
    for (position, id) in (0i32..).zip(ids.iter()) {
        sqlx::query("UPDATE hero_banners SET position = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(position)
            .bind(now)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    list(pool).await
}

// =============================================================================
// PUBLIC READS
// =============================================================================

/// Active banners in carousel order, for the public landing page.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_active(pool: &PgPool) -> Result<Vec<HeroBanner>, BannerError> {
    let rows = sqlx::query(&format!(
        "SELECT {BANNER_COLUMNS} FROM hero_banners WHERE is_active ORDER BY position, created_at"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_banner).collect())
}

/// The first active banner, used as the static hero fallback.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn featured(pool: &PgPool) -> Result<Option<HeroBanner>, BannerError> {
    let row = sqlx::query(&format!(
        "SELECT {BANNER_COLUMNS} FROM hero_banners WHERE is_active ORDER BY position, created_at LIMIT 1"
    ))
    .fetch_optional(pool)
    .await?;
    Ok(row.as_ref().map(row_to_banner))
}
