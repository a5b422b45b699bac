// Echoboard portal server
// Resolves the tenant for every incoming request and serves its portal

mod config;
mod handlers;
mod middleware;
mod routes;
#[cfg(test)]
mod test_support;

use config::Config;
use dotenvy::dotenv;
use echoboard_tenant::TenantDirectory;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub struct AppState {
    pub config: Config,
    pub tenants: Arc<dyn TenantDirectory>,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,echoboard_api=debug,tower_http=debug".to_string()),
        )
        .init();

    tracing::info!("🚀 Starting Echoboard portal server");
    tracing::info!("📦 Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    tracing::info!(
        "🌍 Host mode: {:?}, environment: {:?}",
        config.host_mode,
        config.environment
    );
    tracing::info!("🔌 Server: {}:{}", config.server_host, config.server_port);

    tracing::info!("🗄️  Connecting to database...");
    let database = echoboard_database::Database::new(config.database.clone())
        .await
        .expect("Failed to connect to database");
    database.ping().await.expect("Database ping failed");
    tracing::info!("✅ Database connected");

    let tenants: Arc<dyn TenantDirectory> = Arc::new(echoboard_database::TenantRepository::new(
        database.pool().clone(),
        config.platform_domain.clone(),
    ));

    let state = Arc::new(AppState {
        config: config.clone(),
        tenants,
    });

    let app = routes::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("✅ Server ready at http://{}", addr);

    axum::serve(listener, app).await.expect("Server error");
}
