//! Quoin API Server
//!
//! Main entry point for the Quoin loan-quoting backend.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quoin_api::{AppState, create_router};
use quoin_core::underwriting::DebtPolicy;
use quoin_db::connect;
use quoin_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quoin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Resolve the underwriting policy
    let policy = DebtPolicy::from(&config.underwriting);
    info!(
        debt_rate = %policy.debt_rate(),
        dscr_target = %policy.dscr_target,
        amortization_months = policy.amortization_months,
        "Underwriting policy configured"
    );

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        policy,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
