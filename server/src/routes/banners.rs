//! Admin hero banner routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use time::OffsetDateTime;
use uuid::Uuid;

use models::{HeroBanner, HeroBannerInput, ReorderRequest};

use crate::routes::auth::AuthUser;
use crate::routes::detail;
use crate::services::banners::{self, BannerError};
use crate::state::AppState;

pub(crate) fn banner_error_to_response(err: BannerError) -> Response {
    match err {
        BannerError::NotFound(_) => detail(StatusCode::NOT_FOUND, "Banner not found"),
        BannerError::Validation(ref v) => detail(StatusCode::UNPROCESSABLE_ENTITY, &v.to_string()),
        BannerError::Database(ref e) => {
            tracing::error!(error = %e, "banner database error");
            detail(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

/// `GET /api/admin/banners` — all banners in carousel order.
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> Result<Json<Vec<HeroBanner>>, Response> {
    Ok(Json(banners::list(&state.pool).await.map_err(banner_error_to_response)?))
}

/// `GET /api/admin/banners/:id` — fetch one banner.
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<HeroBanner>, Response> {
    Ok(Json(banners::get(&state.pool, id).await.map_err(banner_error_to_response)?))
}

/// `POST /api/admin/banners` — create a banner at the end of the carousel.
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<HeroBannerInput>,
) -> Result<Response, Response> {
    let banner = banners::create(&state.pool, &input, OffsetDateTime::now_utc())
        .await
        .map_err(banner_error_to_response)?;
    Ok((StatusCode::CREATED, Json(banner)).into_response())
}

/// `PUT /api/admin/banners/:id` — replace editable fields.
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<HeroBannerInput>,
) -> Result<Json<HeroBanner>, Response> {
    let banner = banners::update(&state.pool, id, &input, OffsetDateTime::now_utc())
        .await
        .map_err(banner_error_to_response)?;
    Ok(Json(banner))
}

/// `DELETE /api/admin/banners/:id` — delete a banner.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, Response> {
    banners::delete(&state.pool, id).await.map_err(banner_error_to_response)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `POST /api/admin/banners/:id/toggle-active` — flip carousel membership.
pub async fn toggle_active(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<HeroBanner>, Response> {
    let banner = banners::toggle_active(&state.pool, id, OffsetDateTime::now_utc())
        .await
        .map_err(banner_error_to_response)?;
    Ok(Json(banner))
}

/// `POST /api/admin/banners/reorder` — rewrite carousel positions.
pub async fn reorder(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Vec<HeroBanner>>, Response> {
    let ordered = banners::reorder(&state.pool, &request.ids, OffsetDateTime::now_utc())
        .await
        .map_err(banner_error_to_response)?;
    Ok(Json(ordered))
}
