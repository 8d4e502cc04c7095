mod db;
mod rate_limit;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    if let Err(e) = services::auth::ensure_bootstrap_admin(&pool).await {
        tracing::error!(error = %e, "bootstrap admin setup failed");
    }

    let state = state::AppState::new(pool.clone());

    // Expired session rows are swept hourly in the background.
    let _sweeper = services::session::spawn_session_sweeper(pool);

    let app = routes::app(state).expect("router init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "meridian cms listening");
    axum::serve(listener, app).await.expect("server failed");
}
