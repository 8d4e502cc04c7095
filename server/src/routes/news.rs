//! Admin news routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use models::{NewsArticle, NewsCategory, NewsInput, NewsStats, Page};

use crate::routes::auth::AuthUser;
use crate::routes::detail;
use crate::services::news::{self, NewsError, NewsFilter};
use crate::state::AppState;

pub(crate) fn news_error_to_response(err: NewsError) -> Response {
    match err {
        NewsError::NotFound(_) => detail(StatusCode::NOT_FOUND, "Article not found"),
        NewsError::SlugTaken => detail(StatusCode::CONFLICT, &err.to_string()),
        NewsError::Validation(ref v) => detail(StatusCode::UNPROCESSABLE_ENTITY, &v.to_string()),
        NewsError::Database(ref e) => {
            tracing::error!(error = %e, "news database error");
            detail(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

#[derive(Deserialize)]
pub struct NewsListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub category: Option<NewsCategory>,
    pub published: Option<bool>,
}

/// `GET /api/admin/news` — paged listing with filters.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<NewsListQuery>,
) -> Result<Json<Page<NewsArticle>>, Response> {
    let filter = NewsFilter {
        page: query.page,
        size: query.size,
        search: query.search,
        category: query.category,
        published: query.published,
    };
    let page = news::list(&state.pool, &filter).await.map_err(news_error_to_response)?;
    Ok(Json(page))
}

/// `GET /api/admin/news/stats` — list header aggregates.
pub async fn stats(State(state): State<AppState>, _auth: AuthUser) -> Result<Json<NewsStats>, Response> {
    Ok(Json(news::stats(&state.pool).await.map_err(news_error_to_response)?))
}

/// `GET /api/admin/news/:id` — fetch one article.
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<NewsArticle>, Response> {
    Ok(Json(news::get(&state.pool, id).await.map_err(news_error_to_response)?))
}

/// `POST /api/admin/news` — create a draft.
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<NewsInput>,
) -> Result<Response, Response> {
    let article = news::create(&state.pool, &input, OffsetDateTime::now_utc())
        .await
        .map_err(news_error_to_response)?;
    Ok((StatusCode::CREATED, Json(article)).into_response())
}

/// `PUT /api/admin/news/:id` — replace editable fields.
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<NewsInput>,
) -> Result<Json<NewsArticle>, Response> {
    let article = news::update(&state.pool, id, &input, OffsetDateTime::now_utc())
        .await
        .map_err(news_error_to_response)?;
    Ok(Json(article))
}

/// `DELETE /api/admin/news/:id` — delete an article.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, Response> {
    news::delete(&state.pool, id).await.map_err(news_error_to_response)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `POST /api/admin/news/:id/publish` — publish an article.
pub async fn publish(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<NewsArticle>, Response> {
    let article = news::set_published(&state.pool, id, true, OffsetDateTime::now_utc())
        .await
        .map_err(news_error_to_response)?;
    Ok(Json(article))
}

/// `POST /api/admin/news/:id/unpublish` — pull an article back to draft.
pub async fn unpublish(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<NewsArticle>, Response> {
    let article = news::set_published(&state.pool, id, false, OffsetDateTime::now_utc())
        .await
        .map_err(news_error_to_response)?;
    Ok(Json(article))
}
