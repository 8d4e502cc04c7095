//! Session management: token issue, validation, rotation, and expiry.
//!
//! ARCHITECTURE
//! ============
//! Sessions are opaque random tokens handed to the admin app at login.
//! The database stores only a SHA-256 hash of each token, so a leaked
//! sessions table cannot be replayed. Every session expires at the next
//! UTC midnight after issue; a session validated with less than
//! `ROTATION_THRESHOLD` of life left is rotated in place, which is how
//! signed-in staff ride across the midnight boundary without re-auth.
//!
//! ERROR HANDLING
//! ==============
//! All fallible paths surface `sqlx::Error`; callers decide whether a
//! missing row is a 401 or a `{valid: false}` body.

use std::fmt::Write;

use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use models::{User, UserRole};

/// Sessions this close to expiry are rotated during validation.
pub const ROTATION_THRESHOLD: Duration = Duration::hours(2);

/// How often the background sweeper deletes expired session rows.
const SWEEP_INTERVAL_SECS: u64 = 3600;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Hash a token for storage or lookup. Only hashes touch the database.
#[must_use]
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    bytes_to_hex(&digest)
}

/// The next UTC midnight strictly after `now`. Sessions issued at
/// midnight exactly still get a full day.
#[must_use]
pub fn midnight_expiry(now: OffsetDateTime) -> OffsetDateTime {
    let now = now.to_offset(time::UtcOffset::UTC);
    let next = now.date().next_day().unwrap_or(now.date());
    next.midnight().assume_utc()
}

/// Whether a session has entered the rotation window.
#[must_use]
pub fn needs_rotation(expires_at: OffsetDateTime, now: OffsetDateTime) -> bool {
    expires_at - now < ROTATION_THRESHOLD
}

/// Render an expiry for the wire. RFC 3339, UTC.
#[must_use]
pub fn expiry_string(expires_at: OffsetDateTime) -> String {
    expires_at
        .to_offset(time::UtcOffset::UTC)
        .format(&Rfc3339)
        .unwrap_or_else(|_| expires_at.to_string())
}

/// A live session row joined with its owning account.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub user: User,
    pub expires_at: OffsetDateTime,
}

/// Create a session for the given user, returning the token and expiry.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_session(
    pool: &PgPool,
    user_id: Uuid,
    now: OffsetDateTime,
) -> Result<(String, OffsetDateTime), sqlx::Error> {
    let token = generate_token();
    let expires_at = midnight_expiry(now);
    sqlx::query("INSERT INTO sessions (token_hash, user_id, expires_at) VALUES ($1, $2, $3)")
        .bind(hash_token(&token))
        .bind(user_id)
        .bind(expires_at)
        .execute(pool)
        .await?;
    Ok((token, expires_at))
}

/// Validate a session token, touch `last_seen_at`, and return the
/// associated account.
///
/// # Errors
///
/// Returns a database error if the lookup fails. An unknown or expired
/// token is `Ok(None)`, not an error.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionRecord>, sqlx::Error> {
    let row = sqlx::query(
        r"UPDATE sessions s
          SET last_seen_at = now()
          FROM users u
          WHERE s.token_hash = $1
            AND s.expires_at > now()
            AND u.id = s.user_id
          RETURNING u.id, u.email, u.full_name, u.role, u.is_active, s.expires_at",
    )
    .bind(hash_token(token))
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| SessionRecord {
        user: User {
            id: r.get("id"),
            email: r.get("email"),
            full_name: r.get("full_name"),
            role: UserRole::from_str(r.get::<String, _>("role").as_str()).unwrap_or(UserRole::Editor),
            is_active: r.get("is_active"),
        },
        expires_at: r.get("expires_at"),
    }))
}

/// Replace a session in the rotation window: issue a fresh token with a
/// fresh midnight expiry and revoke the old one atomically.
///
/// # Errors
///
/// Returns a database error if either statement or the commit fails.
pub async fn rotate_session(
    pool: &PgPool,
    old_token: &str,
    user_id: Uuid,
    now: OffsetDateTime,
) -> Result<(String, OffsetDateTime), sqlx::Error> {
    let token = generate_token();
    let expires_at = midnight_expiry(now);

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
        .bind(hash_token(old_token))
        .execute(&mut *tx)
        .await?;
    sqlx::query("INSERT INTO sessions (token_hash, user_id, expires_at) VALUES ($1, $2, $3)")
        .bind(hash_token(&token))
        .bind(user_id)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok((token, expires_at))
}

/// Delete a session by token. Deleting an already-gone session is fine.
///
/// # Errors
///
/// Returns a database error if the delete fails.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
        .bind(hash_token(token))
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete all expired session rows, returning how many went.
///
/// # Errors
///
/// Returns a database error if the delete fails.
pub async fn sweep_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Spawn the hourly sweeper for expired sessions. Returns a handle for
/// shutdown.
pub fn spawn_session_sweeper(pool: PgPool) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(std::time::Duration::from_secs(SWEEP_INTERVAL_SECS)).await;
            match sweep_expired(&pool).await {
                Ok(0) => {}
                Ok(swept) => tracing::info!(swept, "expired sessions removed"),
                Err(e) => tracing::error!(error = %e, "session sweep failed"),
            }
        }
    })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
