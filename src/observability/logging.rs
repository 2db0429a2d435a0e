//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber (pretty or JSON output)
//! - Provide the redacting audit logger used by the gateway pipeline
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level configurable via config and `RUST_LOG`
//! - Redaction is shallow: only top-level keys of the data object are
//!   inspected, and matching is case-sensitive. Nested secrets pass through.
//! - The caller's data is never mutated; records carry a redacted copy

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Top-level keys whose values are replaced before a record is emitted.
pub const SENSITIVE_FIELDS: [&str; 5] = ["password", "token", "secret", "key", "auth"];

/// Replacement for redacted values.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Tracing target of every audit record.
pub const AUDIT_TARGET: &str = "dashboard_gateway::audit";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "dashboard_gateway={level},tower_http={level}",
            level = config.log_level.trim()
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Severity of an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// A single audit record as handed to the sink.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
    /// Redacted copy of the caller's data.
    pub data: Value,
}

/// Process-wide audit logger that redacts sensitive fields.
pub struct SecureLogger;

impl SecureLogger {
    /// Build a redacted record and emit it through tracing.
    pub fn log(level: LogLevel, message: &str, data: &Value) -> LogRecord {
        let record = LogRecord {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            level,
            message: message.to_string(),
            data: redact(data),
        };

        match record.level {
            LogLevel::Info => tracing::info!(
                target: AUDIT_TARGET,
                timestamp = %record.timestamp,
                data = %record.data,
                "{}",
                record.message
            ),
            LogLevel::Warn => tracing::warn!(
                target: AUDIT_TARGET,
                timestamp = %record.timestamp,
                data = %record.data,
                "{}",
                record.message
            ),
            LogLevel::Error => tracing::error!(
                target: AUDIT_TARGET,
                timestamp = %record.timestamp,
                data = %record.data,
                "{}",
                record.message
            ),
        }

        record
    }

    pub fn info(message: &str, data: &Value) -> LogRecord {
        Self::log(LogLevel::Info, message, data)
    }

    pub fn warn(message: &str, data: &Value) -> LogRecord {
        Self::log(LogLevel::Warn, message, data)
    }

    pub fn error(message: &str, data: &Value) -> LogRecord {
        Self::log(LogLevel::Error, message, data)
    }
}

/// Return a copy of `data` with sensitive top-level keys redacted.
/// Non-object values are returned unchanged.
pub fn redact(data: &Value) -> Value {
    let Value::Object(fields) = data else {
        return data.clone();
    };

    let mut redacted = fields.clone();
    for field in SENSITIVE_FIELDS {
        if let Some(value) = redacted.get_mut(field) {
            *value = Value::String(REDACTION_MARKER.to_string());
        }
    }
    Value::Object(redacted)
}
