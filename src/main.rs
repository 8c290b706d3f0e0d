use business_dashboard::{AppConfig, AppState, ProfileGenerator, app};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("🚀 Starting Business Dashboard API");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Server: {}", config.address());
    info!("   - Headlines: {}", config.content.headlines.len());

    let generator = ProfileGenerator::new(config.content.headlines.iter().cloned())?;
    let router = app(AppState::new(generator));

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server running on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /health               - Health check");
    info!("   GET  /business-data        - Business profile from query");
    info!("   POST /business-data        - Business profile from JSON body");
    info!("   GET  /regenerate-headline  - Fresh headline");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
