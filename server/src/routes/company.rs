//! Admin company profile routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Json, Response};
use time::OffsetDateTime;

use models::{CompanyInfo, CompanyInput};

use crate::routes::auth::AuthUser;
use crate::routes::detail;
use crate::services::company::{self, CompanyError};
use crate::state::AppState;

pub(crate) fn company_error_to_response(err: CompanyError) -> Response {
    match err {
        CompanyError::NotSet => detail(StatusCode::NOT_FOUND, "Company profile not set"),
        CompanyError::Validation(ref v) => detail(StatusCode::UNPROCESSABLE_ENTITY, &v.to_string()),
        CompanyError::Database(ref e) => {
            tracing::error!(error = %e, "company database error");
            detail(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

/// `GET /api/admin/company` — fetch the profile.
pub async fn get(State(state): State<AppState>, _auth: AuthUser) -> Result<Json<CompanyInfo>, Response> {
    Ok(Json(company::get(&state.pool).await.map_err(company_error_to_response)?))
}

/// `PUT /api/admin/company` — create or replace the profile.
pub async fn upsert(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<CompanyInput>,
) -> Result<Json<CompanyInfo>, Response> {
    let info = company::upsert(&state.pool, &input, OffsetDateTime::now_utc())
        .await
        .map_err(company_error_to_response)?;
    Ok(Json(info))
}
