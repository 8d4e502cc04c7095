//! Credential authentication: password hashing, login checks,
//! registration, and the bootstrap admin account.
//!
//! DESIGN
//! ======
//! Passwords are hashed with Argon2id (64 MiB, 3 iterations, 4 lanes)
//! and stored as PHC strings. Login failures collapse to a single
//! `InvalidCredentials` error so responses never reveal whether the
//! email or the password was wrong; unknown emails still burn a hash to
//! keep timing comparable.

use std::sync::OnceLock;

use argon2::password_hash::{Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, Version};
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use models::{User, UserRole, validate};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Inactive user")]
    Inactive,
    #[error("Email already registered")]
    EmailTaken,
    #[error("{0}")]
    Validation(#[from] models::ValidationError),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Lowercase and trim an email for storage and lookup.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

// =============================================================================
// PASSWORD HASHING
// =============================================================================

static ENGINE: OnceLock<Argon2<'static>> = OnceLock::new();

fn engine() -> &'static Argon2<'static> {
    ENGINE.get_or_init(|| {
        let params = Params::new(
            64 * 1024, // 64 MiB memory (m)
            3,         // iterations (t)
            4,         // parallelism lanes (p)
            None,      // default hash length
        )
        .expect("valid Argon2 parameters");

        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    })
}

/// Hash a password into a PHC string.
///
/// # Errors
///
/// Returns [`AuthError::Hash`] if salting or hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = engine()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC string. A wrong password is
/// `Ok(false)`; only malformed hashes are errors.
///
/// # Errors
///
/// Returns [`AuthError::Hash`] if the stored hash cannot be parsed.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hash(e.to_string()))?;

    match engine().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(AuthError::Hash(e.to_string())),
    }
}

// =============================================================================
// LOGIN
// =============================================================================

/// Check credentials and return the account profile, recording the
/// login time.
///
/// # Errors
///
/// `InvalidCredentials` for unknown email or wrong password, `Inactive`
/// for a disabled account, otherwise hashing/database errors.
pub async fn authenticate(
    pool: &PgPool,
    email: &str,
    password: &str,
    now: OffsetDateTime,
) -> Result<User, AuthError> {
    let email = normalize_email(email);
    let row = sqlx::query(
        "SELECT id, email, full_name, password_hash, role, is_active FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        // Equalize timing with the known-account path.
        let _ = hash_password(password);
        return Err(AuthError::InvalidCredentials);
    };

    let stored_hash: String = row.get("password_hash");
    if !verify_password(password, &stored_hash)? {
        return Err(AuthError::InvalidCredentials);
    }
    if !row.get::<bool, _>("is_active") {
        return Err(AuthError::Inactive);
    }

    let id: Uuid = row.get("id");
    sqlx::query("UPDATE users SET last_login_at = $1 WHERE id = $2")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(User {
        id,
        email: row.get("email"),
        full_name: row.get("full_name"),
        role: UserRole::from_str(row.get::<String, _>("role").as_str()).unwrap_or(UserRole::Editor),
        is_active: true,
    })
}

// =============================================================================
// REGISTRATION + BOOTSTRAP
// =============================================================================

/// Create an account through the public sign-up form.
///
/// The very first account becomes an active admin; every later sign-up
/// is an inactive editor until an admin activates it.
///
/// # Errors
///
/// Validation errors for malformed input, `EmailTaken` on conflict,
/// otherwise hashing/database errors.
pub async fn register(
    pool: &PgPool,
    email: &str,
    password: &str,
    full_name: &str,
    now: OffsetDateTime,
) -> Result<User, AuthError> {
    let email = normalize_email(email);
    validate::validate_email(&email)?;
    validate::validate_password(password)?;
    let full_name = full_name.trim();
    if full_name.is_empty() {
        return Err(models::ValidationError::field("full_name", "must not be empty").into());
    }

    let existing_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    let (role, is_active) = if existing_users == 0 { (UserRole::Admin, true) } else { (UserRole::Editor, false) };

    insert_account(pool, &email, password, full_name, role, is_active, now).await
}

/// Insert an account row; shared by sign-up, admin user creation, and
/// the bootstrap path.
///
/// # Errors
///
/// `EmailTaken` when the email is already registered, otherwise
/// hashing/database errors.
pub(crate) async fn insert_account(
    pool: &PgPool,
    email: &str,
    password: &str,
    full_name: &str,
    role: UserRole,
    is_active: bool,
    now: OffsetDateTime,
) -> Result<User, AuthError> {
    let id = Uuid::new_v4();
    let password_hash = hash_password(password)?;

    let result = sqlx::query(
        "INSERT INTO users (id, email, full_name, password_hash, role, is_active, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $7)",
    )
    .bind(id)
    .bind(email)
    .bind(full_name)
    .bind(&password_hash)
    .bind(role.as_str())
    .bind(is_active)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(User { id, email: email.to_owned(), full_name: full_name.to_owned(), role, is_active }),
        Err(e) if is_unique_violation(&e) => Err(AuthError::EmailTaken),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error().is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

/// Create the initial admin from `ADMIN_EMAIL`/`ADMIN_PASSWORD` when the
/// users table is empty. A populated table or missing env is a no-op.
///
/// # Errors
///
/// Returns hashing/database errors; a taken email is treated as
/// already-bootstrapped.
pub async fn ensure_bootstrap_admin(pool: &PgPool) -> Result<(), AuthError> {
    let (Ok(email), Ok(password)) = (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) else {
        return Ok(());
    };

    let existing_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if existing_users > 0 {
        return Ok(());
    }

    let email = normalize_email(&email);
    match insert_account(pool, &email, &password, "Administrator", UserRole::Admin, true, OffsetDateTime::now_utc())
        .await
    {
        Ok(user) => {
            tracing::info!(email = %user.email, "bootstrap admin created");
            Ok(())
        }
        Err(AuthError::EmailTaken) => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
