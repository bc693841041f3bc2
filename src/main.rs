use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weight_tracker_api::{cors_layer, create_router, AppConfig, AppState, Database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weight_tracker_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let addr = config.socket_addr()?;
    let cors = cors_layer(&config.cors_origin)?;

    let database = match Database::open(&config.database_path, config.pool_max_size) {
        Ok(database) => database,
        Err(e) => {
            tracing::error!("❌ Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let app = create_router(AppState::from_database(&database)).layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("🚀 Weight Tracker API running on http://{}", addr);
    tracing::info!("📊 Health check: http://{}/health", addr);
    tracing::info!("📚 Swagger UI: http://{}/swagger-ui", addr);
    tracing::info!("🌐 CORS origin: {}", config.cors_origin);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    database.close();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
