use std::sync::Arc;

use anyhow::Context;
use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use team_todo_api::{auth::TokenKeys, config::Config, db, route::create_router, AppState};

// Entry point of the application
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("team_todo_api=debug,tower_http=debug")),
        )
        .init();

    // Connect to the database and create the tables if they don't exist
    let pool = db::connect_pool(&config.database_url).await?;
    db::init_db(&pool).await.context("create tables")?;
    tracing::info!(database = %config.database_url, "database ready");

    let app_state = Arc::new(AppState {
        db: pool,
        keys: TokenKeys::new(&config.jwt_secret, config.token_ttl_days),
    });

    // Configure CORS settings for the SPA client
    let cors = CorsLayer::new()
        .allow_origin(
            config
                .allowed_origin
                .parse::<HeaderValue>()
                .context("parse ALLOWED_ORIGIN")?,
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_credentials(true)
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE]);

    let app = create_router(app_state).layer(cors);

    tracing::info!(addr = %config.bind_addr, "server started");
    axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .await
        .context("run server")?;

    Ok(())
}
