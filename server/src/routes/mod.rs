//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the REST API and the Leptos SSR admin app under a single Axum
//! router. Session-guarded admin routes live under `/api/admin`, auth
//! under `/api/auth`, anonymous reads under `/api/public`. The marketing
//! website is served as static files at `/`, the admin app at `/admin`.

pub mod auth;
pub mod banners;
pub mod company;
pub mod contacts;
pub mod news;
pub mod offerings;
pub mod products;
pub mod public;
pub mod team;
pub mod users;

use std::path::PathBuf;

use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Standard error body: `{"detail": "..."}` with the given status.
pub(crate) fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "detail": message }))).into_response()
}

/// CORS for the API: explicit origins from `CORS_ALLOWED_ORIGINS`
/// (comma-separated), or permissive when unset (dev).
fn cors_layer() -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];
    match std::env::var("CORS_ALLOWED_ORIGINS") {
        Ok(raw) => {
            let origins: Vec<HeaderValue> = raw
                .split(',')
                .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
                .collect();
            // Credentialed CORS forbids wildcard headers.
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(methods)
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_credentials(true)
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(methods).allow_headers(Any),
    }
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/register", post(auth::register))
        .route("/check-auth", get(auth::check_auth))
        .route("/validate-session", get(auth::validate_session))
        .route("/me", get(auth::me))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/news", get(news::list).post(news::create))
        .route("/news/stats", get(news::stats))
        .route("/news/{id}", get(news::get).put(news::update).delete(news::delete))
        .route("/news/{id}/publish", post(news::publish))
        .route("/news/{id}/unpublish", post(news::unpublish))
        .route("/banners", get(banners::list).post(banners::create))
        .route("/banners/reorder", post(banners::reorder))
        .route("/banners/{id}", get(banners::get).put(banners::update).delete(banners::delete))
        .route("/banners/{id}/toggle-active", post(banners::toggle_active))
        .route("/products", get(products::list).post(products::create))
        .route("/products/{id}", get(products::get).put(products::update).delete(products::delete))
        .route("/products/{id}/toggle-featured", post(products::toggle_featured))
        .route("/offerings", get(offerings::list).post(offerings::create))
        .route("/offerings/{id}", get(offerings::get).put(offerings::update).delete(offerings::delete))
        .route("/team", get(team::list).post(team::create))
        .route("/team/reorder", post(team::reorder))
        .route("/team/{id}", get(team::get).put(team::update).delete(team::delete))
        .route("/team/{id}/toggle-active", post(team::toggle_active))
        .route("/company", get(company::get).put(company::upsert))
        .route("/contacts", get(contacts::list))
        .route("/contacts/stats", get(contacts::stats))
        .route("/contacts/{id}", get(contacts::get).delete(contacts::delete))
        .route("/contacts/{id}/mark-read", post(contacts::mark_read))
        .route("/contacts/{id}/mark-unread", post(contacts::mark_unread))
        .route("/contacts/{id}/reply", post(contacts::reply))
        .route("/users", get(users::list).post(users::create))
        .route("/users/stats", get(users::stats))
        .route("/users/{id}", get(users::get).put(users::update).delete(users::delete))
        .route("/users/{id}/toggle-active", post(users::toggle_active))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/banners", get(public::banners))
        .route("/banners/featured", get(public::featured_banner))
        .route("/products", get(public::products))
        .route("/products/featured", get(public::featured_products))
        .route("/offerings", get(public::offerings))
        .route("/offerings/featured", get(public::featured_offerings))
        .route("/team", get(public::team))
        .route("/company", get(public::company))
        .route("/news", get(public::news))
        .route("/news/latest", get(public::latest_news))
        .route("/news/{slug}", get(public::news_by_slug))
        .route("/announcements", get(public::announcements))
        .route("/contact", post(public::submit_contact))
        .route("/search", get(public::search))
}

/// REST API under `/api`, with CORS, gzip, and request tracing.
fn api_routes(state: AppState) -> Router {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/admin", admin_routes())
        .nest("/api/public", public_routes())
        .route("/healthz", get(healthz))
        .layer(cors_layer())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolve the path to the marketing website directory.
fn website_dir() -> PathBuf {
    std::env::var("WEBSITE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../website"))
}

/// Full application: API routes + Leptos SSR admin at `/admin` +
/// marketing site at `/`.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded
/// (missing or malformed `[package.metadata.leptos]` section).
pub fn app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());
    let website_service = ServeDir::new(website_dir()).append_index_html_on_directories(true);

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .fallback_service(website_service))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
