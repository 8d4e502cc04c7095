//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Fallible calls return `Result<T, String>` with the server's `detail`
//! message when one was sent, so pages can show it verbatim. Transport
//! failures and HTTP failures are both `Err`; session validation is the
//! one place the caller distinguishes them, so it gets the raw
//! transport error separately.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

use models::{LoginResponse, SessionValidationResponse, User};
#[cfg(feature = "hydrate")]
use serde::Serialize;
#[cfg(feature = "hydrate")]
use serde::de::DeserializeOwned;

/// Pull the `detail` message out of an error body, falling back to the
/// given message when the body is not the standard error shape.
#[cfg(any(test, feature = "hydrate"))]
fn extract_detail(body: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail")?.as_str().map(ToOwned::to_owned))
        .unwrap_or_else(|| fallback.to_owned())
}

#[cfg(feature = "hydrate")]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(feature = "hydrate")]
async fn error_from(resp: gloo_net::http::Response, fallback: &str) -> String {
    let body = resp.text().await.unwrap_or_default();
    extract_detail(&body, fallback)
}

// =============================================================================
// AUTH
// =============================================================================

/// Sign in via `POST /api/auth/login` (form-encoded, OAuth2-style field
/// names).
///
/// # Errors
///
/// Returns the server's `detail` message, or "Login failed".
pub async fn login(email: &str, password: &str) -> Result<LoginResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        // serde_urlencoded is the encoder axum's `Form` extractor decodes
        // with server-side.
        let body = serde_urlencoded::to_string([("username", email), ("password", password)])
            .map_err(|_| "Login failed".to_owned())?;
        let resp = gloo_net::http::Request::post("/api/auth/login")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|_| "Login failed".to_owned())?;
        if !resp.ok() {
            return Err(error_from(resp, "Login failed").await);
        }
        resp.json::<LoginResponse>().await.map_err(|_| "Login failed".to_owned())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err("not available on server".to_owned())
    }
}

/// Best-effort `POST /api/auth/logout`. Failures are swallowed; the
/// caller clears local state regardless.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post("/api/auth/logout").send().await;
    }
}

/// `GET /api/auth/validate-session` with a bearer token.
///
/// # Errors
///
/// `Err` only on transport failure; an HTTP-level rejection still
/// parses into the authoritative `{valid: false}` body.
pub async fn validate_session(token: &str) -> Result<SessionValidationResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/validate-session")
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        resp.json::<SessionValidationResponse>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err("not available on server".to_owned())
    }
}

/// `GET /api/auth/me`. Returns `None` when not authenticated or on the
/// server.
pub async fn fetch_current_user(token: &str) -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/me")
            .header("Authorization", &bearer(token))
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<User>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        None
    }
}

/// `POST /api/auth/register` — public sign-up.
///
/// # Errors
///
/// Returns the server's `detail` message on rejection.
pub async fn register(email: &str, password: &str, full_name: &str) -> Result<User, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({
            "email": email,
            "password": password,
            "full_name": full_name,
        });
        let resp = gloo_net::http::Request::post("/api/auth/register")
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(error_from(resp, "Registration failed").await);
        }
        resp.json::<User>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password, full_name);
        Err("not available on server".to_owned())
    }
}

// =============================================================================
// BEARER-AUTHENTICATED JSON (admin CRUD)
// =============================================================================

/// `GET` a JSON resource with a bearer token.
///
/// # Errors
///
/// Returns the server's `detail` message or a transport error string.
#[cfg(feature = "hydrate")]
pub async fn get_json<T: DeserializeOwned>(path: &str, token: &str) -> Result<T, String> {
    let resp = gloo_net::http::Request::get(path)
        .header("Authorization", &bearer(token))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(error_from(resp, "Request failed").await);
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

#[cfg(not(feature = "hydrate"))]
pub async fn get_json<T>(path: &str, token: &str) -> Result<T, String> {
    let _ = (path, token);
    Err("not available on server".to_owned())
}

/// `POST` a JSON body, expecting a JSON response.
///
/// # Errors
///
/// Returns the server's `detail` message or a transport error string.
#[cfg(feature = "hydrate")]
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    token: &str,
    body: &B,
) -> Result<T, String> {
    let resp = gloo_net::http::Request::post(path)
        .header("Authorization", &bearer(token))
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(error_from(resp, "Request failed").await);
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

#[cfg(not(feature = "hydrate"))]
pub async fn post_json<B, T>(path: &str, token: &str, body: &B) -> Result<T, String> {
    let _ = (path, token, body);
    Err("not available on server".to_owned())
}

/// `POST` with no body, expecting a JSON response (toggle/action routes).
///
/// # Errors
///
/// Returns the server's `detail` message or a transport error string.
#[cfg(feature = "hydrate")]
pub async fn post_empty<T: DeserializeOwned>(path: &str, token: &str) -> Result<T, String> {
    let resp = gloo_net::http::Request::post(path)
        .header("Authorization", &bearer(token))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(error_from(resp, "Request failed").await);
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

#[cfg(not(feature = "hydrate"))]
pub async fn post_empty<T>(path: &str, token: &str) -> Result<T, String> {
    let _ = (path, token);
    Err("not available on server".to_owned())
}

/// `PUT` a JSON body, expecting a JSON response.
///
/// # Errors
///
/// Returns the server's `detail` message or a transport error string.
#[cfg(feature = "hydrate")]
pub async fn put_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    token: &str,
    body: &B,
) -> Result<T, String> {
    let resp = gloo_net::http::Request::put(path)
        .header("Authorization", &bearer(token))
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(error_from(resp, "Request failed").await);
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

#[cfg(not(feature = "hydrate"))]
pub async fn put_json<B, T>(path: &str, token: &str, body: &B) -> Result<T, String> {
    let _ = (path, token, body);
    Err("not available on server".to_owned())
}

/// `DELETE` a resource.
///
/// # Errors
///
/// Returns the server's `detail` message or a transport error string.
pub async fn delete(path: &str, token: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::delete(path)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(error_from(resp, "Request failed").await);
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (path, token);
        Err("not available on server".to_owned())
    }
}

/// `GET` a public JSON resource (no auth header).
///
/// # Errors
///
/// Returns the server's `detail` message or a transport error string.
#[cfg(feature = "hydrate")]
pub async fn get_public_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let resp = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(error_from(resp, "Request failed").await);
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

#[cfg(not(feature = "hydrate"))]
pub async fn get_public_json<T>(path: &str) -> Result<T, String> {
    let _ = path;
    Err("not available on server".to_owned())
}
