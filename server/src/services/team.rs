//! Team member service: the leadership grid on the about-us page.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use models::{TeamMember, TeamMemberInput};

#[derive(Debug, thiserror::Error)]
pub enum TeamError {
    #[error("team member not found: {0}")]
    NotFound(Uuid),
    #[error("{0}")]
    Validation(#[from] models::ValidationError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

const MEMBER_COLUMNS: &str =
    "id, name, title, bio, department, email, phone, photo_url, is_active, position, created_at, updated_at";

fn row_to_member(r: &PgRow) -> TeamMember {
    TeamMember {
        id: r.get("id"),
        name: r.get("name"),
        title: r.get("title"),
        bio: r.get("bio"),
        department: r.get("department"),
        email: r.get("email"),
        phone: r.get("phone"),
        photo_url: r.get("photo_url"),
        is_active: r.get("is_active"),
        position: r.get("position"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

fn check_input(input: &TeamMemberInput) -> Result<(), TeamError> {
    if input.name.trim().is_empty() {
        return Err(models::ValidationError::field("name", "must not be empty").into());
    }
    if input.title.trim().is_empty() {
        return Err(models::ValidationError::field("title", "must not be empty").into());
    }
    if let Some(email) = input.email.as_deref() {
        if !email.trim().is_empty() {
            models::validate::validate_email(email).map_err(TeamError::Validation)?;
        }
    }
    Ok(())
}

/// All team members for the admin panel, in display order.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<TeamMember>, TeamError> {
    let rows = sqlx::query(&format!("SELECT {MEMBER_COLUMNS} FROM team_members ORDER BY position, created_at"))
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(row_to_member).collect())
}

/// Fetch one team member by id.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn get(pool: &PgPool, id: Uuid) -> Result<TeamMember, TeamError> {
    let row = sqlx::query(&format!("SELECT {MEMBER_COLUMNS} FROM team_members WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(row_to_member).ok_or(TeamError::NotFound(id))
}

/// Create a team member at the end of the display order.
///
/// # Errors
///
/// Validation errors for bad payloads, otherwise database errors.
pub async fn create(pool: &PgPool, input: &TeamMemberInput, now: OffsetDateTime) -> Result<TeamMember, TeamError> {
    check_input(input)?;
    let id = Uuid::new_v4();

    let row = sqlx::query(&format!(
        "INSERT INTO team_members (id, name, title, bio, department, email, phone, photo_url,
                                   position, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8,
                 (SELECT COALESCE(MAX(position), -1) + 1 FROM team_members), $9, $9)
         RETURNING {MEMBER_COLUMNS}"
    ))
    .bind(id)
    .bind(input.name.trim())
    .bind(input.title.trim())
    .bind(&input.bio)
    .bind(&input.department)
    .bind(&input.email)
    .bind(&input.phone)
    .bind(&input.photo_url)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row_to_member(&row))
}

/// Replace a team member's editable fields.
///
/// # Errors
///
/// `NotFound` for an unknown id, validation errors for bad payloads,
/// otherwise database errors.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &TeamMemberInput,
    now: OffsetDateTime,
) -> Result<TeamMember, TeamError> {
    check_input(input)?;
    let row = sqlx::query(&format!(
        "UPDATE team_members
         SET name = $2, title = $3, bio = $4, department = $5, email = $6, phone = $7,
             photo_url = $8, updated_at = $9
         WHERE id = $1
         RETURNING {MEMBER_COLUMNS}"
    ))
    .bind(id)
    .bind(input.name.trim())
    .bind(input.title.trim())
    .bind(&input.bio)
    .bind(&input.department)
    .bind(&input.email)
    .bind(&input.phone)
    .bind(&input.photo_url)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(row_to_member).ok_or(TeamError::NotFound(id))
}

/// Delete a team member.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), TeamError> {
    let result = sqlx::query("DELETE FROM team_members WHERE id = $1").bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(TeamError::NotFound(id));
    }
    Ok(())
}

/// Flip a member in or out of the public page.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn toggle_active(pool: &PgPool, id: Uuid, now: OffsetDateTime) -> Result<TeamMember, TeamError> {
    let row = sqlx::query(&format!(
        "UPDATE team_members SET is_active = NOT is_active, updated_at = $2 WHERE id = $1
         RETURNING {MEMBER_COLUMNS}"
    ))
    .bind(id)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(row_to_member).ok_or(TeamError::NotFound(id))
}

/// Rewrite display positions from an explicit id ordering.
///
/// # Errors
///
/// Returns a database error if any statement or the commit fails.
pub async fn reorder(pool: &PgPool, ids: &[Uuid], now: OffsetDateTime) -> Result<Vec<TeamMember>, TeamError> {
    let mut tx = pool.begin().await?;
    for (position, id) in (0i32..).zip(ids.iter()) {
        sqlx::query("UPDATE team_members SET position = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(position)
            .bind(now)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    list(pool).await
}

/// Active members for the public about-us page, optionally by department.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_active(pool: &PgPool, department: Option<&str>) -> Result<Vec<TeamMember>, TeamError> {
    let rows = match department.map(str::trim).filter(|d| !d.is_empty()) {
        Some(department) => {
            sqlx::query(&format!(
                "SELECT {MEMBER_COLUMNS} FROM team_members WHERE is_active AND department = $1
                 ORDER BY position, created_at"
            ))
            .bind(department)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(&format!(
                "SELECT {MEMBER_COLUMNS} FROM team_members WHERE is_active ORDER BY position, created_at"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    Ok(rows.iter().map(row_to_member).collect())
}
