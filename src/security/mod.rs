//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound host message:
//!     → origin.rs (allow-list match)
//!     → rate_limit.rs (per-origin sliding window)
//!     → shape.rs (envelope contract)
//!     → sanitize.rs (deep HTML escaping)
//!     → Pass to gateway publication
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any security check failure
//! - No trust in host input until every stage has passed
//! - Every check is a pure function except the rate limiter, which owns
//!   its window state behind a mutex

pub mod origin;
pub mod rate_limit;
pub mod sanitize;
pub mod shape;
pub mod url_policy;

pub use origin::{AllowList, OriginPattern, DEFAULT_ALLOWED_ORIGINS};
pub use rate_limit::RateLimiter;
pub use sanitize::{escape_html, DeepSanitizer, SanitizeError};
pub use shape::{check_envelope, is_valid_envelope, ShapeViolation};
