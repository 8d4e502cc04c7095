//! Admin team member routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use time::OffsetDateTime;
use uuid::Uuid;

use models::{ReorderRequest, TeamMember, TeamMemberInput};

use crate::routes::auth::AuthUser;
use crate::routes::detail;
use crate::services::team::{self, TeamError};
use crate::state::AppState;

pub(crate) fn team_error_to_response(err: TeamError) -> Response {
    match err {
        TeamError::NotFound(_) => detail(StatusCode::NOT_FOUND, "Team member not found"),
        TeamError::Validation(ref v) => detail(StatusCode::UNPROCESSABLE_ENTITY, &v.to_string()),
        TeamError::Database(ref e) => {
            tracing::error!(error = %e, "team database error");
            detail(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

/// `GET /api/admin/team` — all members in display order.
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> Result<Json<Vec<TeamMember>>, Response> {
    Ok(Json(team::list(&state.pool).await.map_err(team_error_to_response)?))
}

/// `GET /api/admin/team/:id` — fetch one member.
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamMember>, Response> {
    Ok(Json(team::get(&state.pool, id).await.map_err(team_error_to_response)?))
}

/// `POST /api/admin/team` — create a member at the end of the order.
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<TeamMemberInput>,
) -> Result<Response, Response> {
    let member = team::create(&state.pool, &input, OffsetDateTime::now_utc())
        .await
        .map_err(team_error_to_response)?;
    Ok((StatusCode::CREATED, Json(member)).into_response())
}

/// `PUT /api/admin/team/:id` — replace editable fields.
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<TeamMemberInput>,
) -> Result<Json<TeamMember>, Response> {
    let member = team::update(&state.pool, id, &input, OffsetDateTime::now_utc())
        .await
        .map_err(team_error_to_response)?;
    Ok(Json(member))
}

/// `DELETE /api/admin/team/:id` — delete a member.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, Response> {
    team::delete(&state.pool, id).await.map_err(team_error_to_response)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `POST /api/admin/team/:id/toggle-active` — flip public visibility.
pub async fn toggle_active(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamMember>, Response> {
    let member = team::toggle_active(&state.pool, id, OffsetDateTime::now_utc())
        .await
        .map_err(team_error_to_response)?;
    Ok(Json(member))
}

/// `POST /api/admin/team/reorder` — rewrite display positions.
pub async fn reorder(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Vec<TeamMember>>, Response> {
    let ordered = team::reorder(&state.pool, &request.ids, OffsetDateTime::now_utc())
        .await
        .map_err(team_error_to_response)?;
    Ok(Json(ordered))
}
