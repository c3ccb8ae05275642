use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use venuebook::config::AppConfig;
use venuebook::services::backend::http::HttpBackend;
use venuebook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let backend = HttpBackend::new(
        config.api_base_url.clone(),
        config.stats_base_url.clone(),
        config.feedback_base_url.clone(),
        config.upstream_timeout,
    )?;
    tracing::info!(
        api = %config.api_base_url,
        stats = %config.stats_base_url,
        feedback = %config.feedback_base_url,
        "using reservation API"
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        backend: Arc::new(backend),
    });

    let app = venuebook::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
