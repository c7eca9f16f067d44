use divvy::api::handlers::{AppService, api_routes};
use divvy::api::openapi::ApiDoc;
use divvy::config::CONFIG;
use divvy::{DivvyService, InMemoryAuditLog, InMemoryCache, InMemoryStorage};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(CONFIG.log_level.as_str())
        .init();

    // Wire up the in-memory infrastructure
    let storage = InMemoryStorage::new();
    let audit = InMemoryAuditLog::new();
    let cache = InMemoryCache::new();
    let service: Arc<AppService> = Arc::new(DivvyService::new(
        storage,
        audit,
        cache,
        CONFIG.jwt_secret.clone(),
        Duration::from_secs(CONFIG.balance_cache_ttl_secs),
    ));

    let app = api_routes(service)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", <ApiDoc as utoipa::OpenApi>::openapi()))
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30))) // 30-second timeout
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([http::Method::GET, http::Method::POST])
                .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http()); // Request tracing

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
