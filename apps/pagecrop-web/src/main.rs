//! pagecrop web server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use pagecrop_web::{app, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pagecrop_web=info".parse()?)
                .add_directive("pagecrop_core=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("Initializing pagecrop...");
    let state = Arc::new(AppState::new()?);
    info!("Workspace root at {}", state.root.path().display());

    let app = app(state.clone());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8086);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting pagecrop on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Last owner of the state; dropping it removes the workspace root and
    // every session directory under it.
    info!("Shutting down, removing workspace root");
    drop(state);

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
