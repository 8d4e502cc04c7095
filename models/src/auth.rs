//! Auth wire types: login, session validation, and account management.
//!
//! SYSTEM CONTEXT
//! ==============
//! These structs are the contract between the backend session store and
//! the admin app's session manager. `expires_at` fields travel as
//! RFC 3339 strings and the client stores them verbatim, so they stay
//! `String` here rather than parsed timestamps.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Staff role attached to an account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full access, including user management.
    Admin,
    /// Content management only.
    Editor,
}

impl UserRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
        }
    }

    /// Parse a role from its stored string form.
    #[must_use]
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "editor" => Some(Self::Editor),
            _ => None,
        }
    }
}

/// Profile shape embedded in auth responses and cached by the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    /// Inactive accounts cannot sign in.
    pub is_active: bool,
}

/// Full account row as seen in the admin user list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Time of the most recent successful login, if any.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_login_at: Option<OffsetDateTime>,
}

impl UserAccount {
    /// Reduce an account row to the profile shape auth responses carry.
    #[must_use]
    pub fn profile(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            is_active: self.is_active,
        }
    }
}

/// Successful response body for `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque session token; sent back as `Authorization: Bearer`.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// Session expiry as an RFC 3339 string.
    pub expires_at: String,
    pub user: User,
}

/// Response body for `GET /api/auth/check-auth`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthCheckResponse {
    pub authenticated: bool,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Response body for `GET /api/auth/validate-session`.
///
/// `{"valid": false}` with everything else absent is a complete,
/// authoritative rejection; all other fields default when missing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionValidationResponse {
    pub valid: bool,
    /// True when the server rotated the session during this check.
    #[serde(default)]
    pub token_refreshed: bool,
    /// Replacement token, present only when `token_refreshed` is true.
    #[serde(default)]
    pub new_token: Option<String>,
    /// Expiry of the (possibly rotated) session, RFC 3339.
    #[serde(default)]
    pub expires_at: Option<String>,
    /// Fresh profile for a valid session.
    #[serde(default)]
    pub user: Option<User>,
}

impl SessionValidationResponse {
    /// The authoritative "session is gone" response.
    #[must_use]
    pub fn rejected() -> Self {
        Self { valid: false, token_refreshed: false, new_token: None, expires_at: None, user: None }
    }
}

/// Aggregates for the admin user list header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub admins: i64,
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
