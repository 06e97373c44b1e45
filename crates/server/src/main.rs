use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use server::config::ServerConfig;
use server::db::{create_pool, run_migrations, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    server::health::mark_started();

    let config = ServerConfig::from_env();
    let pool = create_pool();
    run_migrations(&pool).await;

    let state = AppState { pool };
    let app = Router::new()
        .route("/health", get(server::health::health))
        .route("/api-docs/openapi.json", get(server::openapi::openapi_json))
        .merge(server::rest::api_router_with_auth())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
