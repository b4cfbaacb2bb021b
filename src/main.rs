use health_dashboard::{AppConfig, AppState, load_data, router};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env();
    let data = load_data(&config.data_path).await;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!(
        data_path = %config.data_path.display(),
        windows = %config.weight_windows,
        "starting health dashboard"
    );
    let app = router(AppState::new(config, data));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
