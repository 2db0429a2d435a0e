//! Dashboard context gateway.
//!
//! Receives context messages from a host support-desk page, decides whether
//! to trust them, and serves the sanitized result to the dashboard.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────────┐
//!                       │                  DASHBOARD GATEWAY                   │
//!                       │                                                      │
//!   Host page           │  ┌──────────┐   ┌──────────────────────────────────┐ │
//!   ── WebSocket ───────┼─▶│  bridge  │──▶│          MessageGateway          │ │
//!      (Origin header)  │  │  /host   │   │ origin → rate limit → JSON →     │ │
//!   ◀─ fetch command ───┼──│          │   │ shape → deep sanitize → audit    │ │
//!                       │  └──────────┘   └───────────────┬──────────────────┘ │
//!                       │                                 │ sanitized context  │
//!                       │                                 ▼                    │
//!   Dashboard client    │  ┌──────────┐   ┌──────────────────────────────────┐ │
//!   ◀─ JSON ────────────┼──│ handlers │◀──│ Dashboard (context, tasks)       │ │
//!      /context /tasks  │  └──────────┘   └──────────────────────────────────┘ │
//!                       │                                                      │
//!                       │  config · observability · lifecycle                 │
//!                       └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use dashboard_gateway::config::{load_config, GatewayConfig};
use dashboard_gateway::lifecycle::startup;
use dashboard_gateway::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config path: first argument, then GATEWAY_CONFIG, else defaults
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("GATEWAY_CONFIG").ok())
        .map(PathBuf::from);

    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!("dashboard-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = ?config_path,
        bind_address = %config.listener.bind_address,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
