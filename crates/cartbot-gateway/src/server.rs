use crate::webhook::{receive_handler, verify_handler, WebhookState};
use axum::{response::IntoResponse, routing::get, Router};
use cartbot_core::{CartbotError, CartbotResult};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// The webhook gateway.
pub struct GatewayServer;

impl GatewayServer {
    /// Routes: `GET /webhook`, `POST /webhook`, `GET /health`.
    pub fn build(state: Arc<WebhookState>) -> Router {
        Router::new()
            .route("/webhook", get(verify_handler).post(receive_handler))
            .route("/health", get(health_handler))
            .with_state(state)
    }

    /// Serve `app` on `listener` until `shutdown` completes.
    pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> CartbotResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            info!("Cartbot gateway listening on {}", addr);
        }
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| CartbotError::Gateway(format!("Server error: {e}")))
    }
}

async fn health_handler() -> impl IntoResponse {
    serde_json::json!({"status": "ok", "service": "cartbot"}).to_string()
}

/// Completes on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
