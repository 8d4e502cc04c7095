//! Admin user management routes. All of these require the admin role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use models::{UserAccount, UserRole, UserStats};

use crate::routes::auth::AuthUser;
use crate::routes::detail;
use crate::services::users::{self, NewUser, UserError, UserFilter, UserUpdate};
use crate::state::AppState;

pub(crate) fn user_error_to_response(err: UserError) -> Response {
    match err {
        UserError::NotFound(_) => detail(StatusCode::NOT_FOUND, "User not found"),
        UserError::EmailTaken => detail(StatusCode::CONFLICT, &err.to_string()),
        UserError::LastAdmin => detail(StatusCode::CONFLICT, &err.to_string()),
        UserError::Validation(ref v) => detail(StatusCode::UNPROCESSABLE_ENTITY, &v.to_string()),
        UserError::Hash(ref m) => {
            tracing::error!(error = %m, "password hashing failed");
            detail(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
        UserError::Database(ref e) => {
            tracing::error!(error = %e, "user database error");
            detail(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

#[derive(Deserialize)]
pub struct UserListQuery {
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub active: Option<bool>,
}

/// `GET /api/admin/users` — account listing with filters.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<UserAccount>>, Response> {
    auth.require_admin()?;
    let filter = UserFilter { search: query.search, role: query.role, active: query.active };
    Ok(Json(users::list(&state.pool, &filter).await.map_err(user_error_to_response)?))
}

/// `GET /api/admin/users/stats` — list header aggregates.
pub async fn stats(State(state): State<AppState>, auth: AuthUser) -> Result<Json<UserStats>, Response> {
    auth.require_admin()?;
    Ok(Json(users::stats(&state.pool).await.map_err(user_error_to_response)?))
}

/// `GET /api/admin/users/:id` — fetch one account.
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserAccount>, Response> {
    auth.require_admin()?;
    Ok(Json(users::get(&state.pool, id).await.map_err(user_error_to_response)?))
}

#[derive(Deserialize)]
pub struct CreateUserBody {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// `POST /api/admin/users` — create an account.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateUserBody>,
) -> Result<Response, Response> {
    auth.require_admin()?;
    let new_user = NewUser {
        email: body.email,
        password: body.password,
        full_name: body.full_name,
        role: body.role.unwrap_or(UserRole::Editor),
        is_active: body.is_active.unwrap_or(true),
    };
    let account = users::create(&state.pool, &new_user, OffsetDateTime::now_utc())
        .await
        .map_err(user_error_to_response)?;
    Ok((StatusCode::CREATED, Json(account)).into_response())
}

#[derive(Deserialize)]
pub struct UpdateUserBody {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub password: Option<String>,
}

/// `PUT /api/admin/users/:id` — partial account update.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserBody>,
) -> Result<Json<UserAccount>, Response> {
    auth.require_admin()?;
    let update = UserUpdate {
        email: body.email,
        full_name: body.full_name,
        role: body.role,
        is_active: body.is_active,
        password: body.password,
    };
    let account = users::update(&state.pool, id, &update, OffsetDateTime::now_utc())
        .await
        .map_err(user_error_to_response)?;
    Ok(Json(account))
}

/// `DELETE /api/admin/users/:id` — delete an account.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, Response> {
    auth.require_admin()?;
    if auth.user.id == id {
        return Err(detail(StatusCode::CONFLICT, "cannot delete your own account"));
    }
    users::delete(&state.pool, id).await.map_err(user_error_to_response)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `POST /api/admin/users/:id/toggle-active` — flip an account's active
/// flag, revoking its sessions on deactivation.
pub async fn toggle_active(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserAccount>, Response> {
    auth.require_admin()?;
    let account = users::toggle_active(&state.pool, id, OffsetDateTime::now_utc())
        .await
        .map_err(user_error_to_response)?;
    Ok(Json(account))
}
