//! Anonymous routes backing the marketing website.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use time::OffsetDateTime;

use models::{
    CompanyInfo, ContactInput, ContactMessage, HeroBanner, NewsArticle, NewsCategory, Page, Product, SearchResults,
    ServiceOffering, TeamMember,
};

use crate::routes::banners::banner_error_to_response;
use crate::routes::company::company_error_to_response;
use crate::routes::contacts::contact_error_to_response;
use crate::routes::detail;
use crate::routes::news::news_error_to_response;
use crate::routes::offerings::offering_error_to_response;
use crate::routes::products::product_error_to_response;
use crate::routes::team::team_error_to_response;
use crate::services::{banners, company, contacts, listing, news, offerings, products, team};
use crate::state::AppState;

const LATEST_NEWS_DEFAULT: i64 = 5;
const SEARCH_GROUP_LIMIT: i64 = 10;

/// `GET /api/public/banners` — active carousel banners, in order.
pub async fn banners(State(state): State<AppState>) -> Result<Json<Vec<HeroBanner>>, Response> {
    Ok(Json(banners::list_active(&state.pool).await.map_err(banner_error_to_response)?))
}

/// `GET /api/public/banners/featured` — the first active banner.
pub async fn featured_banner(State(state): State<AppState>) -> Result<Json<HeroBanner>, Response> {
    let banner = banners::featured(&state.pool).await.map_err(banner_error_to_response)?;
    banner.map(Json).ok_or_else(|| detail(StatusCode::NOT_FOUND, "No active banner"))
}

#[derive(Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

/// `GET /api/public/products` — active products, optionally by category.
pub async fn products(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Vec<Product>>, Response> {
    let items = products::list_active(&state.pool, query.category.as_deref())
        .await
        .map_err(product_error_to_response)?;
    Ok(Json(items))
}

/// `GET /api/public/products/featured` — featured products for the landing page.
pub async fn featured_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, Response> {
    Ok(Json(products::list_featured(&state.pool).await.map_err(product_error_to_response)?))
}

/// `GET /api/public/offerings` — active service offerings.
pub async fn offerings(State(state): State<AppState>) -> Result<Json<Vec<ServiceOffering>>, Response> {
    Ok(Json(offerings::list_active(&state.pool).await.map_err(offering_error_to_response)?))
}

/// `GET /api/public/offerings/featured` — featured offerings for the landing page.
pub async fn featured_offerings(State(state): State<AppState>) -> Result<Json<Vec<ServiceOffering>>, Response> {
    Ok(Json(offerings::list_featured(&state.pool).await.map_err(offering_error_to_response)?))
}

#[derive(Deserialize)]
pub struct DepartmentQuery {
    pub department: Option<String>,
}

/// `GET /api/public/team` — active team members, optionally by department.
pub async fn team(
    State(state): State<AppState>,
    Query(query): Query<DepartmentQuery>,
) -> Result<Json<Vec<TeamMember>>, Response> {
    let members = team::list_active(&state.pool, query.department.as_deref())
        .await
        .map_err(team_error_to_response)?;
    Ok(Json(members))
}

/// `GET /api/public/company` — the company profile for the about-us page.
pub async fn company(State(state): State<AppState>) -> Result<Json<CompanyInfo>, Response> {
    Ok(Json(company::get(&state.pool).await.map_err(company_error_to_response)?))
}

#[derive(Deserialize)]
pub struct PublicNewsQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub category: Option<NewsCategory>,
}

/// `GET /api/public/news` — published articles, paginated.
pub async fn news(
    State(state): State<AppState>,
    Query(query): Query<PublicNewsQuery>,
) -> Result<Json<Page<NewsArticle>>, Response> {
    let page = news::list_published(&state.pool, query.page, query.size, query.category)
        .await
        .map_err(news_error_to_response)?;
    Ok(Json(page))
}

#[derive(Deserialize)]
pub struct LatestQuery {
    pub limit: Option<i64>,
}

/// `GET /api/public/news/latest` — the most recent published articles.
pub async fn latest_news(
    State(state): State<AppState>,
    Query(query): Query<LatestQuery>,
) -> Result<Json<Vec<NewsArticle>>, Response> {
    let items = news::latest(&state.pool, query.limit.unwrap_or(LATEST_NEWS_DEFAULT))
        .await
        .map_err(news_error_to_response)?;
    Ok(Json(items))
}

/// `GET /api/public/news/:slug` — one published article; counts the view.
pub async fn news_by_slug(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<NewsArticle>, Response> {
    Ok(Json(news::get_by_slug(&state.pool, &slug).await.map_err(news_error_to_response)?))
}

/// `GET /api/public/announcements` — live announcements, priority order.
pub async fn announcements(State(state): State<AppState>) -> Result<Json<Vec<NewsArticle>>, Response> {
    let items = news::active_announcements(&state.pool, OffsetDateTime::now_utc())
        .await
        .map_err(news_error_to_response)?;
    Ok(Json(items))
}

/// `POST /api/public/contact` — store a contact form submission.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(input): Json<ContactInput>,
) -> Result<Response, Response> {
    let message: ContactMessage = contacts::submit(&state.pool, &input, OffsetDateTime::now_utc())
        .await
        .map_err(contact_error_to_response)?;
    Ok((StatusCode::CREATED, Json(message)).into_response())
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub content_type: Option<String>,
}

/// `GET /api/public/search` — grouped matches across news, products, and
/// offerings; `content_type` narrows to one group.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResults>, Response> {
    let term = query.q.trim();
    if term.is_empty() {
        return Err(detail(StatusCode::UNPROCESSABLE_ENTITY, "q: must not be empty"));
    }
    let limit = SEARCH_GROUP_LIMIT.min(listing::MAX_PAGE_SIZE);
    let content_type = query.content_type.as_deref();

    let mut results = SearchResults { query: term.to_owned(), ..Default::default() };
    if matches!(content_type, None | Some("news")) {
        results.news = news::search(&state.pool, term, limit).await.map_err(news_error_to_response)?;
    }
    if matches!(content_type, None | Some("products")) {
        results.products = products::search(&state.pool, term, limit)
            .await
            .map_err(product_error_to_response)?;
    }
    if matches!(content_type, None | Some("offerings")) {
        results.offerings = offerings::search(&state.pool, term, limit)
            .await
            .map_err(offering_error_to_response)?;
    }
    Ok(Json(results))
}
