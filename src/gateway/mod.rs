//! Inbound message gateway.
//!
//! # Data Flow
//! ```text
//! raw host message (origin, text)
//!     → pipeline.rs (origin → rate limit → JSON → shape → sanitize)
//!     → context.rs (typed AppContext, already sanitized)
//!     → ContextSink::publish (presentation layer)
//!
//! Rejections feed warnings.rs (bounded, user-visible)
//! ```
//!
//! # Design Decisions
//! - Every message runs to completion before the call returns; no stage
//!   awaits, so a message is never interleaved with another mid-pipeline
//! - The rate limiter is constructed by the caller and injected
//! - Consumers receive only sanitized data and must not re-validate it

pub mod context;
pub mod pipeline;
pub mod warnings;

pub use context::{Agent, AppContext, Contact, Conversation};
pub use pipeline::{GatewayError, MessageGateway, Outcome};
pub use warnings::WarningLog;

/// Receiver of sanitized context, implemented by the presentation layer.
pub trait ContextSink: Send + Sync {
    fn publish(&self, context: AppContext);
}
