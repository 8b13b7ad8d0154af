use axum::{routing::get, Router};
use std::net::SocketAddr;
use tracing::{error, info};

pub const ALIVE_MESSAGE: &str = "Bot is running!";

async fn alive() -> &'static str {
    ALIVE_MESSAGE
}

pub fn router() -> Router {
    Router::new().route("/", get(alive))
}

/// Serves the liveness route until the process exits. Errors are logged and
/// never take the bot down with them.
pub async fn serve(port: u16) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind liveness endpoint on port {}: {}", port, e);
            return;
        }
    };

    info!("Liveness endpoint listening on port {}", port);

    if let Err(e) = axum::serve(listener, router()).await {
        error!("Liveness endpoint stopped: {}", e);
    }
}
