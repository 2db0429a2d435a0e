//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → /host      → websocket.rs (host bridge → MessageGateway)
//!     → /context, /tasks, /health → handlers.rs (sanitized read API)
//! ```

pub mod handlers;
pub mod server;
pub mod websocket;

pub use server::{AppState, HttpServer};
