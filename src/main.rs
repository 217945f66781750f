use product_api::config::load_config;
use product_api::infrastructure::{build_store, logger::Logger};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (mut config, source) = load_config()?;
    config.apply_env_overrides()?;
    config.validate()?;

    // 初始化日志
    Logger::init(&config.logging)?;
    info!("Configuration loaded from {}", source);

    let store = build_store(&config).await.map_err(|e| {
        error!("Failed to initialize product store: {}", e);
        e
    })?;

    let app = product_api::router(&config, store);

    let listener =
        TcpListener::bind((config.http.bind_address.as_str(), config.http.port)).await?;
    let addr = listener.local_addr()?;

    info!("🚀 Product API running on http://{}", addr);
    info!("   GET    /products      - List products");
    info!("   POST   /products      - Create product");
    info!("   GET    /products/:id  - Show product");
    info!("   PUT    /products/:id  - Update product");
    info!("   DELETE /products/:id  - Delete product");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
