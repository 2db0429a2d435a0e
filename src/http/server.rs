//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeouts)
//! - Own the gateway and dashboard shared by handlers
//! - Serve until the shutdown coordinator fires

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::board::Dashboard;
use crate::config::{GatewayConfig, HostConfig};
use crate::gateway::MessageGateway;
use crate::http::handlers::{
    add_task_handler, context_handler, health_handler, tasks_handler, update_status_handler,
};
use crate::http::websocket::host_bridge_handler;
use crate::lifecycle::Shutdown;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<MessageGateway>,
    pub dashboard: Arc<Dashboard>,
    pub host: HostConfig,
    pub shutdown: Shutdown,
}

/// HTTP server hosting the bridge and the read API.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig, shutdown: Shutdown) -> Self {
        let dashboard = Arc::new(Dashboard::new());
        let gateway = Arc::new(MessageGateway::from_config(&config, dashboard.clone()));

        let state = AppState {
            gateway,
            dashboard,
            host: config.host.clone(),
            shutdown,
        };

        let router = Self::build_router(&config, state.clone());
        Self {
            router,
            config,
            state,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/host", get(host_bridge_handler))
            .route("/context", get(context_handler))
            .route("/tasks", get(tasks_handler).post(add_task_handler))
            .route("/tasks/{id}/status", post(update_status_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let mut stop = self.state.shutdown.subscribe();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = stop.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}
