//! Company profile service.
//!
//! The table holds at most one row; the admin upsert replaces it in
//! place so the about-us page always reads a single profile.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use models::{CompanyInfo, CompanyInput};

#[derive(Debug, thiserror::Error)]
pub enum CompanyError {
    #[error("company profile not set")]
    NotSet,
    #[error("{0}")]
    Validation(#[from] models::ValidationError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

const COMPANY_COLUMNS: &str = "id, name, tagline, description, mission, vision, address, phone, email, website, \
                               founded_year, logo_url, updated_at";

fn row_to_company(r: &PgRow) -> CompanyInfo {
    CompanyInfo {
        id: r.get("id"),
        name: r.get("name"),
        tagline: r.get("tagline"),
        description: r.get("description"),
        mission: r.get("mission"),
        vision: r.get("vision"),
        address: r.get("address"),
        phone: r.get("phone"),
        email: r.get("email"),
        website: r.get("website"),
        founded_year: r.get("founded_year"),
        logo_url: r.get("logo_url"),
        updated_at: r.get("updated_at"),
    }
}

/// Fetch the company profile.
///
/// # Errors
///
/// `NotSet` when no profile has been saved yet, otherwise database
/// errors.
pub async fn get(pool: &PgPool) -> Result<CompanyInfo, CompanyError> {
    let row = sqlx::query(&format!("SELECT {COMPANY_COLUMNS} FROM company_info LIMIT 1"))
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(row_to_company).ok_or(CompanyError::NotSet)
}

/// Create or replace the single company profile row.
///
/// # Errors
///
/// Validation errors for bad payloads, otherwise database errors.
pub async fn upsert(pool: &PgPool, input: &CompanyInput, now: OffsetDateTime) -> Result<CompanyInfo, CompanyError> {
    if input.name.trim().is_empty() {
        return Err(models::ValidationError::field("name", "must not be empty").into());
    }

    let existing_id: Option<Uuid> = sqlx::query_scalar("SELECT id FROM company_info LIMIT 1")
        .fetch_optional(pool)
        .await?;
    let id = existing_id.unwrap_or_else(Uuid::new_v4);

    let row = sqlx::query(&format!(
        "INSERT INTO company_info (id, name, tagline, description, mission, vision, address, phone,
                                   email, website, founded_year, logo_url, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
         ON CONFLICT (id) DO UPDATE SET
             name = EXCLUDED.name, tagline = EXCLUDED.tagline, description = EXCLUDED.description,
             mission = EXCLUDED.mission, vision = EXCLUDED.vision, address = EXCLUDED.address,
             phone = EXCLUDED.phone, email = EXCLUDED.email, website = EXCLUDED.website,
             founded_year = EXCLUDED.founded_year, logo_url = EXCLUDED.logo_url,
             updated_at = EXCLUDED.updated_at
         RETURNING {COMPANY_COLUMNS}"
    ))
    .bind(id)
    .bind(input.name.trim())
    .bind(&input.tagline)
    .bind(&input.description)
    .bind(&input.mission)
    .bind(&input.vision)
    .bind(&input.address)
    .bind(&input.phone)
    .bind(&input.email)
    .bind(&input.website)
    .bind(input.founded_year)
    .bind(&input.logo_url)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row_to_company(&row))
}
