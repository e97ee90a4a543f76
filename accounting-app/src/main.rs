//! # Accounting Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter and seed an empty store
//! - Create the receipt service and the rate client
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use accounting_hex::{ReceiptService, inbound::HttpServer};
use accounting_repo::{build_repo, seed_if_empty};
use exchange_rates::RateClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,accounting_app=debug,accounting_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting accounting server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);
    if config.fixer_key.is_none() {
        tracing::warn!("FIXER_KEY not set; conversion requests will be rejected");
    }

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    // One-time example data for a fresh store
    seed_if_empty(&repo).await?;

    // Create the receipt service and the rate client
    let service = ReceiptService::new(repo);
    let rates = RateClient::new(config.fixer_key);

    // Create and run the HTTP server
    let server = HttpServer::new(service, rates);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
