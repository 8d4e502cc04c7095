//! Admin product routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use time::OffsetDateTime;
use uuid::Uuid;

use models::{Product, ProductInput};

use crate::routes::auth::AuthUser;
use crate::routes::detail;
use crate::services::products::{self, ProductError};
use crate::state::AppState;

pub(crate) fn product_error_to_response(err: ProductError) -> Response {
    match err {
        ProductError::NotFound(_) => detail(StatusCode::NOT_FOUND, "Product not found"),
        ProductError::Validation(ref v) => detail(StatusCode::UNPROCESSABLE_ENTITY, &v.to_string()),
        ProductError::Database(ref e) => {
            tracing::error!(error = %e, "product database error");
            detail(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

/// `GET /api/admin/products` — all products, grouped by category.
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> Result<Json<Vec<Product>>, Response> {
    Ok(Json(products::list(&state.pool).await.map_err(product_error_to_response)?))
}

/// `GET /api/admin/products/:id` — fetch one product.
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, Response> {
    Ok(Json(products::get(&state.pool, id).await.map_err(product_error_to_response)?))
}

/// `POST /api/admin/products` — create a product.
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<ProductInput>,
) -> Result<Response, Response> {
    let product = products::create(&state.pool, &input, OffsetDateTime::now_utc())
        .await
        .map_err(product_error_to_response)?;
    Ok((StatusCode::CREATED, Json(product)).into_response())
}

/// `PUT /api/admin/products/:id` — replace editable fields.
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, Response> {
    let product = products::update(&state.pool, id, &input, OffsetDateTime::now_utc())
        .await
        .map_err(product_error_to_response)?;
    Ok(Json(product))
}

/// `DELETE /api/admin/products/:id` — delete a product.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, Response> {
    products::delete(&state.pool, id).await.map_err(product_error_to_response)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `POST /api/admin/products/:id/toggle-featured` — flip the featured flag.
pub async fn toggle_featured(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, Response> {
    let product = products::toggle_featured(&state.pool, id, OffsetDateTime::now_utc())
        .await
        .map_err(product_error_to_response)?;
    Ok(Json(product))
}
