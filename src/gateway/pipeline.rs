//! Inbound message pipeline.
//!
//! # State Machine
//! ```text
//! AwaitingMessage
//!     → origin not allowed      → OriginRejected  (warning)
//!     → rate limit exceeded     → RateLimited     (silent)
//!     → payload not JSON        → ParseRejected   (silent)
//!     → envelope shape invalid  → ShapeRejected   (warning)
//!     → sanitize + publish      → Accepted
//! every state returns to AwaitingMessage
//! ```
//!
//! Errors after the JSON guard are caught at the `handle` boundary, logged
//! with the error message only, and surface as one generic warning.

use std::sync::Arc;

use serde_json::{json, Number, Value};
use thiserror::Error;

use crate::config::GatewayConfig;
use crate::gateway::context::AppContext;
use crate::gateway::warnings::{WarningLog, INVALID_DATA_WARNING, PROCESSING_ERROR_WARNING};
use crate::gateway::ContextSink;
use crate::observability::metrics;
use crate::observability::SecureLogger;
use crate::security::sanitize::{escape_html, DeepSanitizer, SanitizeError};
use crate::security::shape::check_envelope;
use crate::security::{AllowList, RateLimiter};

/// Result of running one message through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Accepted { conversation_id: Number },
    OriginRejected,
    RateLimited,
    ParseRejected,
    ShapeRejected,
    Failed,
}

impl Outcome {
    /// Metrics label.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Accepted { .. } => "accepted",
            Outcome::OriginRejected => "origin_rejected",
            Outcome::RateLimited => "rate_limited",
            Outcome::ParseRejected => "parse_rejected",
            Outcome::ShapeRejected => "shape_rejected",
            Outcome::Failed => "failed",
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }
}

/// Failures after the payload has parsed as JSON.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Sanitize(#[from] SanitizeError),

    /// The source error is kept out of the message: serde's text can quote
    /// payload values.
    #[error("context fields have unexpected types")]
    Decode(#[source] serde_json::Error),
}

/// Orchestrates origin checks, rate limiting, validation and sanitization
/// for messages arriving from the host.
///
/// Holds no per-message state; only the injected rate limiter and the
/// warning log persist between calls.
pub struct MessageGateway {
    allow_list: AllowList,
    limiter: Arc<RateLimiter>,
    sanitizer: DeepSanitizer,
    warnings: WarningLog,
    sink: Arc<dyn ContextSink>,
}

impl MessageGateway {
    pub fn new(
        allow_list: AllowList,
        limiter: Arc<RateLimiter>,
        sanitizer: DeepSanitizer,
        warnings: WarningLog,
        sink: Arc<dyn ContextSink>,
    ) -> Self {
        Self {
            allow_list,
            limiter,
            sanitizer,
            warnings,
            sink,
        }
    }

    /// Build a gateway from validated configuration.
    pub fn from_config(config: &GatewayConfig, sink: Arc<dyn ContextSink>) -> Self {
        Self::new(
            AllowList::new(config.origins.extra_allowed.as_slice()),
            Arc::new(RateLimiter::from_config(&config.rate_limit)),
            DeepSanitizer::new(config.sanitize.max_depth),
            WarningLog::from_config(&config.warnings),
            sink,
        )
    }

    /// Run one inbound message to completion.
    pub fn handle(&self, origin: &str, raw: &str) -> Outcome {
        let outcome = self.evaluate(origin, raw);
        metrics::record_message(outcome.label());
        metrics::record_tracked_identifiers(self.limiter.tracked_identifiers());
        outcome
    }

    fn evaluate(&self, origin: &str, raw: &str) -> Outcome {
        if !self.allow_list.is_allowed(origin) {
            SecureLogger::warn("Unauthorized origin detected", &json!({ "origin": origin }));
            self.warnings
                .push(format!("Unauthorized origin: {}", escape_html(origin)));
            return Outcome::OriginRejected;
        }

        if !self.limiter.is_allowed(origin) {
            SecureLogger::warn("Rate limit exceeded", &json!({ "origin": origin }));
            return Outcome::RateLimited;
        }

        match self.process(raw) {
            Ok(outcome) => outcome,
            Err(e) => {
                SecureLogger::error(
                    "Failed to process host data",
                    &json!({ "error": e.to_string() }),
                );
                self.warnings.push(PROCESSING_ERROR_WARNING);
                Outcome::Failed
            }
        }
    }

    fn process(&self, raw: &str) -> Result<Outcome, GatewayError> {
        let envelope: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(_) => {
                tracing::debug!(bytes = raw.len(), "Dropping non-JSON host message");
                return Ok(Outcome::ParseRejected);
            }
        };

        // The shape check also pins the event tag to the context event.
        if let Err(violation) = check_envelope(&envelope) {
            SecureLogger::warn(
                "Invalid data received from host",
                &json!({ "reason": violation.to_string() }),
            );
            self.warnings.push(INVALID_DATA_WARNING);
            return Ok(Outcome::ShapeRejected);
        }

        let sanitized = self.sanitizer.sanitize(&envelope)?;
        let data = sanitized.get("data").cloned().unwrap_or(Value::Null);
        let context: AppContext = serde_json::from_value(data).map_err(GatewayError::Decode)?;

        let conversation_id = context.conversation.id.clone();
        SecureLogger::info(
            "Host context processed",
            &json!({
                "conversationId": conversation_id,
                "contactId": context.contact.as_ref().and_then(|c| c.id.clone()),
            }),
        );
        self.sink.publish(context);

        Ok(Outcome::Accepted { conversation_id })
    }

    pub fn warnings(&self) -> &WarningLog {
        &self.warnings
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }
}
