//! Admin service offering routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use time::OffsetDateTime;
use uuid::Uuid;

use models::{ServiceOffering, ServiceOfferingInput};

use crate::routes::auth::AuthUser;
use crate::routes::detail;
use crate::services::offerings::{self, OfferingError};
use crate::state::AppState;

pub(crate) fn offering_error_to_response(err: OfferingError) -> Response {
    match err {
        OfferingError::NotFound(_) => detail(StatusCode::NOT_FOUND, "Service offering not found"),
        OfferingError::Validation(ref v) => detail(StatusCode::UNPROCESSABLE_ENTITY, &v.to_string()),
        OfferingError::Database(ref e) => {
            tracing::error!(error = %e, "offering database error");
            detail(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

/// `GET /api/admin/offerings` — all offerings in display order.
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> Result<Json<Vec<ServiceOffering>>, Response> {
    Ok(Json(offerings::list(&state.pool).await.map_err(offering_error_to_response)?))
}

/// `GET /api/admin/offerings/:id` — fetch one offering.
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceOffering>, Response> {
    Ok(Json(offerings::get(&state.pool, id).await.map_err(offering_error_to_response)?))
}

/// `POST /api/admin/offerings` — create an offering.
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<ServiceOfferingInput>,
) -> Result<Response, Response> {
    let offering = offerings::create(&state.pool, &input, OffsetDateTime::now_utc())
        .await
        .map_err(offering_error_to_response)?;
    Ok((StatusCode::CREATED, Json(offering)).into_response())
}

/// `PUT /api/admin/offerings/:id` — replace editable fields.
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<ServiceOfferingInput>,
) -> Result<Json<ServiceOffering>, Response> {
    let offering = offerings::update(&state.pool, id, &input, OffsetDateTime::now_utc())
        .await
        .map_err(offering_error_to_response)?;
    Ok(Json(offering))
}

/// `DELETE /api/admin/offerings/:id` — delete an offering.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, Response> {
    offerings::delete(&state.pool, id).await.map_err(offering_error_to_response)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
