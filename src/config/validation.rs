//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limits > 0, visible warnings within capacity)
//! - Check that extra origins are well-formed and trustworthy
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;
use crate::security::url_policy::{is_bare_origin, is_secure_url};

/// Level names accepted by the log filter.
const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the configuration, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::new("listener.request_timeout_secs", "must be greater than 0"));
    }

    if config.rate_limit.max_requests == 0 {
        errors.push(ValidationError::new("rate_limit.max_requests", "must be greater than 0"));
    }
    if config.rate_limit.window_ms == 0 {
        errors.push(ValidationError::new("rate_limit.window_ms", "must be greater than 0"));
    }

    if config.sanitize.max_depth == 0 {
        errors.push(ValidationError::new("sanitize.max_depth", "must be greater than 0"));
    }

    if config.warnings.capacity == 0 {
        errors.push(ValidationError::new("warnings.capacity", "must be greater than 0"));
    }
    if config.warnings.visible > config.warnings.capacity {
        errors.push(ValidationError::new(
            "warnings.visible",
            format!("must not exceed warnings.capacity ({})", config.warnings.capacity),
        ));
    }

    if config.host.fetch_command.trim().is_empty() {
        errors.push(ValidationError::new("host.fetch_command", "must not be empty"));
    }
    if config.host.max_message_bytes == 0 {
        errors.push(ValidationError::new("host.max_message_bytes", "must be greater than 0"));
    }

    for (i, pattern) in config.origins.extra_allowed.iter().enumerate() {
        if let Err(message) = validate_origin_pattern(pattern) {
            errors.push(ValidationError::new(format!("origins.extra_allowed[{}]", i), message));
        }
    }

    if !LOG_LEVELS
        .iter()
        .any(|level| level.eq_ignore_ascii_case(config.observability.log_level.trim()))
    {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!(
                "'{}' is not one of {}",
                config.observability.log_level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check that a pattern, with wildcards standing in for a host label, is a
/// bare secure origin.
fn validate_origin_pattern(pattern: &str) -> Result<(), String> {
    if pattern.is_empty() {
        return Err("must not be empty".to_string());
    }
    let concrete = pattern.replace('*', "0");
    if !is_bare_origin(&concrete) {
        return Err(format!("'{}' is not a bare origin (scheme://host[:port])", pattern));
    }
    if !is_secure_url(&concrete) {
        return Err(format!("'{}' must use https, or http on localhost", pattern));
    }
    Ok(())
}
