//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → consumed once at startup by the gateway and server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the origin allow-list in particular
//!   is fixed for the process lifetime, so there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::GatewayConfig;
pub use schema::{
    HostConfig, ListenerConfig, LogFormat, ObservabilityConfig, OriginConfig, RateLimitConfig,
    SanitizeConfig, WarningConfig,
};
