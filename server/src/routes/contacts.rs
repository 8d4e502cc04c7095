//! Admin contact inbox routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Json, Response};
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use models::{ContactMessage, ContactStats, Page};

use crate::routes::auth::AuthUser;
use crate::routes::detail;
use crate::services::contacts::{self, ContactError, ContactFilter};
use crate::state::AppState;

pub(crate) fn contact_error_to_response(err: ContactError) -> Response {
    match err {
        ContactError::NotFound(_) => detail(StatusCode::NOT_FOUND, "Contact message not found"),
        ContactError::Validation(ref v) => detail(StatusCode::UNPROCESSABLE_ENTITY, &v.to_string()),
        ContactError::Database(ref e) => {
            tracing::error!(error = %e, "contact database error");
            detail(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

#[derive(Deserialize)]
pub struct ContactListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub is_read: Option<bool>,
    pub is_replied: Option<bool>,
}

/// `GET /api/admin/contacts` — paged inbox listing.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ContactListQuery>,
) -> Result<Json<Page<ContactMessage>>, Response> {
    let filter = ContactFilter {
        page: query.page,
        size: query.size,
        search: query.search,
        is_read: query.is_read,
        is_replied: query.is_replied,
    };
    let page = contacts::list(&state.pool, &filter).await.map_err(contact_error_to_response)?;
    Ok(Json(page))
}

/// `GET /api/admin/contacts/stats` — inbox header aggregates.
pub async fn stats(State(state): State<AppState>, _auth: AuthUser) -> Result<Json<ContactStats>, Response> {
    Ok(Json(contacts::stats(&state.pool).await.map_err(contact_error_to_response)?))
}

/// `GET /api/admin/contacts/:id` — fetch one message.
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactMessage>, Response> {
    Ok(Json(contacts::get(&state.pool, id).await.map_err(contact_error_to_response)?))
}

/// `DELETE /api/admin/contacts/:id` — delete a message.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, Response> {
    contacts::delete(&state.pool, id).await.map_err(contact_error_to_response)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `POST /api/admin/contacts/:id/mark-read` — mark a message read.
pub async fn mark_read(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactMessage>, Response> {
    Ok(Json(contacts::set_read(&state.pool, id, true).await.map_err(contact_error_to_response)?))
}

/// `POST /api/admin/contacts/:id/mark-unread` — mark a message unread.
pub async fn mark_unread(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactMessage>, Response> {
    Ok(Json(contacts::set_read(&state.pool, id, false).await.map_err(contact_error_to_response)?))
}

#[derive(Deserialize)]
pub struct ReplyBody {
    pub reply_message: String,
}

/// `POST /api/admin/contacts/:id/reply` — record a reply.
pub async fn reply(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<ReplyBody>,
) -> Result<Json<ContactMessage>, Response> {
    let message = contacts::reply(&state.pool, id, &body.reply_message, OffsetDateTime::now_utc())
        .await
        .map_err(contact_error_to_response)?;
    Ok(Json(message))
}
