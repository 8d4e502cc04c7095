//! Auth routes: login, logout, session checks, rotation, registration.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the server half of the admin app's session manager contract.
//! Tokens travel either as `Authorization: Bearer` (the admin app) or as
//! the `session_token` cookie (same-site fallback); every guarded route
//! re-validates the session row, so client-side expiry checks stay
//! advisory.

use axum::Form;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::{Duration, OffsetDateTime};

use models::{AuthCheckResponse, LoginResponse, SessionValidationResponse, User, UserRole};

use crate::routes::detail;
use crate::services::{auth as auth_svc, session};
use crate::state::AppState;

const COOKIE_NAME: &str = "session_token";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    env_bool("COOKIE_SECURE").unwrap_or(false)
}

fn session_cookie(token: &str, expires_at: OffsetDateTime) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .expires(expires_at)
        .build()
}

fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO)
        .build()
}

/// Pull the session token from the bearer header, falling back to the
/// session cookie. Returns `None` when neither carries one.
pub(crate) fn extract_token(parts: &Parts) -> Option<String> {
    if let Some(bearer) = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        let bearer = bearer.trim();
        if !bearer.is_empty() {
            return Some(bearer.to_owned());
        }
    }

    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(COOKIE_NAME)
        .map(Cookie::value)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user resolved from a live session. Use as a handler
/// parameter to require authentication.
pub struct AuthUser {
    pub user: User,
    pub token: String,
    pub expires_at: OffsetDateTime,
}

impl AuthUser {
    /// Reject with 403 unless the session belongs to an admin.
    pub(crate) fn require_admin(&self) -> Result<(), Response> {
        if self.user.role == UserRole::Admin {
            Ok(())
        } else {
            Err(detail(StatusCode::FORBIDDEN, "Not enough permissions"))
        }
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_token(parts) else {
            return Err(detail(StatusCode::UNAUTHORIZED, "Not authenticated"));
        };

        let app_state = AppState::from_ref(state);
        let record = session::validate_session(&app_state.pool, &token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "session lookup failed");
                detail(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            })?
            .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Session expired or invalid"))?;

        if !record.user.is_active {
            return Err(detail(StatusCode::BAD_REQUEST, "Inactive user"));
        }

        Ok(Self { user: record.user, token, expires_at: record.expires_at })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// `POST /api/auth/login` — form-encoded credential login.
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Result<Response, Response> {
    let email = auth_svc::normalize_email(&form.username);

    if let Err(e) = state.login_limiter.check_and_record(&email) {
        return Err(detail(StatusCode::TOO_MANY_REQUESTS, &e.to_string()));
    }

    let now = OffsetDateTime::now_utc();
    let user = auth_svc::authenticate(&state.pool, &email, &form.password, now)
        .await
        .map_err(login_error_to_response)?;

    let (token, expires_at) = session::create_session(&state.pool, user.id, now).await.map_err(|e| {
        tracing::error!(error = %e, "session creation failed");
        detail(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
    })?;
    state.login_limiter.reset_account(&email);

    let body = LoginResponse {
        access_token: token.clone(),
        token_type: "bearer".to_owned(),
        expires_at: session::expiry_string(expires_at),
        user,
    };
    let jar = CookieJar::new().add(session_cookie(&token, expires_at));
    Ok((jar, Json(body)).into_response())
}

fn login_error_to_response(err: auth_svc::AuthError) -> Response {
    match err {
        auth_svc::AuthError::InvalidCredentials => detail(StatusCode::UNAUTHORIZED, &err.to_string()),
        auth_svc::AuthError::Inactive => detail(StatusCode::BAD_REQUEST, &err.to_string()),
        auth_svc::AuthError::EmailTaken => detail(StatusCode::CONFLICT, &err.to_string()),
        auth_svc::AuthError::Validation(ref v) => detail(StatusCode::UNPROCESSABLE_ENTITY, &v.to_string()),
        auth_svc::AuthError::Hash(ref m) => {
            tracing::error!(error = %m, "password hashing failed");
            detail(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
        auth_svc::AuthError::Database(ref e) => {
            tracing::error!(error = %e, "auth database error");
            detail(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

/// `POST /api/auth/logout` — revoke the presented session, clear the
/// cookie. Always 200: logout must succeed from the client's view even
/// when no live session was presented.
pub async fn logout(State(state): State<AppState>, parts: axum::http::request::Parts) -> Response {
    if let Some(token) = extract_token(&parts) {
        if let Err(e) = session::delete_session(&state.pool, &token).await {
            tracing::error!(error = %e, "session delete failed during logout");
        }
    }

    let jar = CookieJar::new().add(clear_session_cookie());
    (jar, Json(serde_json::json!({ "ok": true }))).into_response()
}

/// `GET /api/auth/check-auth` — lightweight session probe.
pub async fn check_auth(State(state): State<AppState>, parts: axum::http::request::Parts) -> Response {
    let Some(token) = extract_token(&parts) else {
        return Json(AuthCheckResponse { authenticated: false, expires_at: None }).into_response();
    };

    match session::validate_session(&state.pool, &token).await {
        Ok(Some(record)) => Json(AuthCheckResponse {
            authenticated: true,
            expires_at: Some(session::expiry_string(record.expires_at)),
        })
        .into_response(),
        Ok(None) => Json(AuthCheckResponse { authenticated: false, expires_at: None }).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "session lookup failed");
            detail(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

/// `GET /api/auth/validate-session` — the admin app's background check.
/// An unknown or expired token is an authoritative `{valid: false}`,
/// not an HTTP error; sessions near expiry are rotated in place.
pub async fn validate_session(State(state): State<AppState>, parts: axum::http::request::Parts) -> Response {
    let Some(token) = extract_token(&parts) else {
        return Json(SessionValidationResponse::rejected()).into_response();
    };

    let record = match session::validate_session(&state.pool, &token).await {
        Ok(Some(record)) => record,
        Ok(None) => return Json(SessionValidationResponse::rejected()).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "session lookup failed");
            return detail(StatusCode::INTERNAL_SERVER_ERROR, "internal error");
        }
    };

    let now = OffsetDateTime::now_utc();
    if session::needs_rotation(record.expires_at, now) {
        match session::rotate_session(&state.pool, &token, record.user.id, now).await {
            Ok((new_token, expires_at)) => {
                let body = SessionValidationResponse {
                    valid: true,
                    token_refreshed: true,
                    new_token: Some(new_token.clone()),
                    expires_at: Some(session::expiry_string(expires_at)),
                    user: Some(record.user),
                };
                let jar = CookieJar::new().add(session_cookie(&new_token, expires_at));
                return (jar, Json(body)).into_response();
            }
            Err(e) => {
                // Rotation is an optimization; the session is still live.
                tracing::error!(error = %e, "session rotation failed");
            }
        }
    }

    Json(SessionValidationResponse {
        valid: true,
        token_refreshed: false,
        new_token: None,
        expires_at: Some(session::expiry_string(record.expires_at)),
        user: Some(record.user),
    })
    .into_response()
}

/// `GET /api/auth/me` — authoritative profile for the current session.
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}

#[derive(Deserialize)]
pub struct RegisterBody {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// `POST /api/auth/register` — public sign-up. The first account becomes
/// an active admin; later ones wait for activation.
pub async fn register(State(state): State<AppState>, Json(body): Json<RegisterBody>) -> Result<Response, Response> {
    let now = OffsetDateTime::now_utc();
    let user = auth_svc::register(&state.pool, &body.email, &body.password, &body.full_name, now)
        .await
        .map_err(login_error_to_response)?;
    Ok((StatusCode::CREATED, Json(user)).into_response())
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
