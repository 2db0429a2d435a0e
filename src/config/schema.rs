//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Command sent to the host page asking for the initial context payload.
pub const DEFAULT_FETCH_COMMAND: &str = "chatwoot-dashboard-app:fetch-info";

/// Root configuration for the dashboard gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Trusted origin extensions.
    pub origins: OriginConfig,

    /// Sliding-window rate limiting of inbound messages.
    pub rate_limit: RateLimitConfig,

    /// Deep sanitization settings.
    pub sanitize: SanitizeConfig,

    /// Advisory warning list shown to the user.
    pub warnings: WarningConfig,

    /// Host bridge settings.
    pub host: HostConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Timeout for plain HTTP requests in seconds. The host bridge
    /// WebSocket is long-lived and not subject to it.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Origins trusted in addition to the built-in defaults.
///
/// The defaults can be extended but never shrunk.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OriginConfig {
    /// Extra origin patterns (exact or with `*` wildcards).
    pub extra_allowed: Vec<String>,
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum accepted messages per origin within one window.
    pub max_requests: u32,

    /// Window length in milliseconds.
    pub window_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 50,
            window_ms: 60_000,
        }
    }
}

/// Deep sanitization configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizeConfig {
    /// Maximum nesting depth walked by the deep sanitizer.
    pub max_depth: usize,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

/// Advisory warning list configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WarningConfig {
    /// Number of warnings retained; oldest are evicted first.
    pub capacity: usize,

    /// Number of most recent warnings exposed to the user.
    pub visible: usize,
}

impl Default for WarningConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            visible: 3,
        }
    }
}

/// Host bridge configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HostConfig {
    /// Command sent to the host when a bridge connection opens.
    pub fetch_command: String,

    /// Maximum size of a single inbound frame in bytes.
    pub max_message_bytes: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            fetch_command: DEFAULT_FETCH_COMMAND.to_string(),
            max_message_bytes: 64 * 1024,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.rate_limit.max_requests, 50);
        assert_eq!(config.rate_limit.window_ms, 60_000);
        assert_eq!(config.warnings.visible, 3);
        assert_eq!(config.host.fetch_command, DEFAULT_FETCH_COMMAND);
        assert!(config.origins.extra_allowed.is_empty());
    }

    #[test]
    fn test_partial_sections() {
        let raw = r#"
            [origins]
            extra_allowed = ["https://support.example.com"]

            [rate_limit]
            max_requests = 5

            [observability]
            log_format = "json"
        "#;
        let config: GatewayConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.origins.extra_allowed, vec!["https://support.example.com"]);
        assert_eq!(config.rate_limit.max_requests, 5);
        // Unspecified fields in a present section keep their defaults
        assert_eq!(config.rate_limit.window_ms, 60_000);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }
}
