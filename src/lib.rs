//! Dashboard context gateway library.

pub mod board;
pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::schema::GatewayConfig;
pub use gateway::{MessageGateway, Outcome};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
