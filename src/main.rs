use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing::{error, info};

use arsip::bootstrap::app_context::{AppContext, AppServices};
use arsip::bootstrap::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "arsip=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting village archive service");

    // Database
    let pool = arsip::infrastructure::db::connect_pool(&cfg.database_path).await?;
    arsip::infrastructure::db::migrate(&pool).await?;

    let services = AppServices::from_config(&cfg, pool).await?;
    let ctx = AppContext::new(cfg.clone(), services);
    let app = arsip::presentation::http::router(ctx);

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(?e, "HTTP server failed");
        return Err(e.into());
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(?e, "shutdown_signal_failed");
    }
    info!("shutdown_requested");
}
