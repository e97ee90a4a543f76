//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use accounting_types::ReceiptRepository;
use exchange_rates::RateClient;

use super::handlers::{self, AppState};
use crate::ReceiptService;

/// HTTP Server for the accounting API.
pub struct HttpServer<R: ReceiptRepository> {
    state: Arc<AppState<R>>,
}

impl<R: ReceiptRepository> HttpServer<R> {
    /// Creates a new HTTP server with the given service and rate client.
    pub fn new(service: ReceiptService<R>, rates: RateClient) -> Self {
        Self {
            state: Arc::new(AppState { service, rates }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/invoices", post(handlers::create_invoice::<R>))
            .route("/invoices", get(handlers::list_invoices::<R>))
            .route("/convert", post(handlers::convert::<R>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
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
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
