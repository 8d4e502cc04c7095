//! Admin user management: the accounts that can sign in to the panel.
//!
//! DESIGN
//! ======
//! These operations are admin-only at the route layer. Guards here keep
//! an admin from locking everyone out: the last active admin can be
//! neither deleted, deactivated, nor demoted.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, QueryBuilder, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use models::{UserAccount, UserRole, UserStats, validate};

use crate::services::auth::{self, AuthError};

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("user not found: {0}")]
    NotFound(Uuid),
    #[error("Email already registered")]
    EmailTaken,
    #[error("cannot remove the last active admin")]
    LastAdmin,
    #[error("{0}")]
    Validation(#[from] models::ValidationError),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<AuthError> for UserError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::EmailTaken => Self::EmailTaken,
            AuthError::Validation(v) => Self::Validation(v),
            AuthError::Hash(m) => Self::Hash(m),
            AuthError::Database(d) => Self::Database(d),
            // Login-only variants cannot come out of account management.
            AuthError::InvalidCredentials | AuthError::Inactive => Self::Hash(e.to_string()),
        }
    }
}

/// Admin user list filters.
#[derive(Debug, Default, Clone)]
pub struct UserFilter {
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub active: Option<bool>,
}

/// Create payload for admin-created accounts.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
}

/// Update payload; `None` fields keep their current value.
#[derive(Debug, Default, Clone)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
}

const ACCOUNT_COLUMNS: &str = "id, email, full_name, role, is_active, created_at, updated_at, last_login_at";

fn row_to_account(r: &PgRow) -> UserAccount {
    UserAccount {
        id: r.get("id"),
        email: r.get("email"),
        full_name: r.get("full_name"),
        role: UserRole::from_str(r.get::<String, _>("role").as_str()).unwrap_or(UserRole::Editor),
        is_active: r.get("is_active"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
        last_login_at: r.get("last_login_at"),
    }
}

/// List accounts for the admin user screen, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list(pool: &PgPool, filter: &UserFilter) -> Result<Vec<UserAccount>, UserError> {
    let mut qb = QueryBuilder::new(format!("SELECT {ACCOUNT_COLUMNS} FROM users WHERE 1=1"));
    if let Some(role) = filter.role {
        qb.push(" AND role = ");
        qb.push_bind(role.as_str());
    }
    if let Some(active) = filter.active {
        qb.push(" AND is_active = ");
        qb.push_bind(active);
    }
    if let Some(search) = filter.search.as_deref().map(str::trim) {
        if !search.is_empty() {
            let pattern = format!("%{search}%");
            qb.push(" AND (email ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR full_name ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
    }
    qb.push(" ORDER BY created_at DESC");

    let rows = qb.build().fetch_all(pool).await?;
    Ok(rows.iter().map(row_to_account).collect())
}

/// Fetch one account by id.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn get(pool: &PgPool, id: Uuid) -> Result<UserAccount, UserError> {
    let row = sqlx::query(&format!("SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(row_to_account).ok_or(UserError::NotFound(id))
}

/// Create an account from the admin user screen.
///
/// # Errors
///
/// Validation errors for bad payloads, `EmailTaken` on conflict,
/// otherwise hashing/database errors.
pub async fn create(pool: &PgPool, new_user: &NewUser, now: OffsetDateTime) -> Result<UserAccount, UserError> {
    let email = auth::normalize_email(&new_user.email);
    validate::validate_email(&email)?;
    validate::validate_password(&new_user.password)?;
    let full_name = new_user.full_name.trim();
    if full_name.is_empty() {
        return Err(models::ValidationError::field("full_name", "must not be empty").into());
    }

    let user =
        auth::insert_account(pool, &email, &new_user.password, full_name, new_user.role, new_user.is_active, now)
            .await?;
    get(pool, user.id).await
}

/// Apply a partial update to an account.
///
/// # Errors
///
/// `NotFound` for an unknown id, `LastAdmin` when the change would
/// remove the final active admin, `EmailTaken` on conflict, validation
/// errors for bad payloads, otherwise hashing/database errors.
pub async fn update(pool: &PgPool, id: Uuid, update: &UserUpdate, now: OffsetDateTime) -> Result<UserAccount, UserError> {
    let current = get(pool, id).await?;

    let email = match update.email.as_deref() {
        Some(e) => {
            let email = auth::normalize_email(e);
            validate::validate_email(&email)?;
            email
        }
        None => current.email.clone(),
    };
    let full_name = match update.full_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_owned(),
        Some(_) => return Err(models::ValidationError::field("full_name", "must not be empty").into()),
        None => current.full_name.clone(),
    };
    let role = update.role.unwrap_or(current.role);
    let is_active = update.is_active.unwrap_or(current.is_active);

    let was_active_admin = current.role == UserRole::Admin && current.is_active;
    let stays_active_admin = role == UserRole::Admin && is_active;
    if was_active_admin && !stays_active_admin && active_admin_count(pool).await? <= 1 {
        return Err(UserError::LastAdmin);
    }

    let password_hash = match update.password.as_deref() {
        Some(password) => {
            validate::validate_password(password)?;
            Some(auth::hash_password(password).map_err(UserError::from)?)
        }
        None => None,
    };

    let result = sqlx::query(&format!(
        "UPDATE users
         SET email = $2, full_name = $3, role = $4, is_active = $5,
             password_hash = COALESCE($6, password_hash), updated_at = $7
         WHERE id = $1
         RETURNING {ACCOUNT_COLUMNS}"
    ))
    .bind(id)
    .bind(&email)
    .bind(&full_name)
    .bind(role.as_str())
    .bind(is_active)
    .bind(password_hash)
    .bind(now)
    .fetch_optional(pool)
    .await;

    match result {
        Ok(Some(row)) => Ok(row_to_account(&row)),
        Ok(None) => Err(UserError::NotFound(id)),
        Err(e) if auth::is_unique_violation(&e) => Err(UserError::EmailTaken),
        Err(e) => Err(e.into()),
    }
}

/// Delete an account and its sessions (cascade).
///
/// # Errors
///
/// `NotFound` for an unknown id, `LastAdmin` when the account is the
/// final active admin, otherwise database errors.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), UserError> {
    let current = get(pool, id).await?;
    if current.role == UserRole::Admin && current.is_active && active_admin_count(pool).await? <= 1 {
        return Err(UserError::LastAdmin);
    }

    let result = sqlx::query("DELETE FROM users WHERE id = $1").bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(UserError::NotFound(id));
    }
    Ok(())
}

/// Flip an account's active flag. Deactivation also revokes the
/// account's sessions so the change takes effect immediately.
///
/// # Errors
///
/// `NotFound` for an unknown id, `LastAdmin` when deactivating the final
/// active admin, otherwise database errors.
pub async fn toggle_active(pool: &PgPool, id: Uuid, now: OffsetDateTime) -> Result<UserAccount, UserError> {
    let current = get(pool, id).await?;
    if current.role == UserRole::Admin && current.is_active && active_admin_count(pool).await? <= 1 {
        return Err(UserError::LastAdmin);
    }

    let row = sqlx::query(&format!(
        "UPDATE users SET is_active = NOT is_active, updated_at = $2 WHERE id = $1
         RETURNING {ACCOUNT_COLUMNS}"
    ))
    .bind(id)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    let account = row.as_ref().map(row_to_account).ok_or(UserError::NotFound(id))?;

    if !account.is_active {
        sqlx::query("DELETE FROM sessions WHERE user_id = $1").bind(id).execute(pool).await?;
    }
    Ok(account)
}

/// Aggregates for the admin user list header.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn stats(pool: &PgPool) -> Result<UserStats, UserError> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS total,
                COUNT(*) FILTER (WHERE is_active) AS active,
                COUNT(*) FILTER (WHERE NOT is_active) AS inactive,
                COUNT(*) FILTER (WHERE role = 'admin') AS admins
         FROM users",
    )
    .fetch_one(pool)
    .await?;

    Ok(UserStats {
        total: row.get("total"),
        active: row.get("active"),
        inactive: row.get("inactive"),
        admins: row.get("admins"),
    })
}

async fn active_admin_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'admin' AND is_active")
        .fetch_one(pool)
        .await
}
