//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → Metrics → Gateway + server → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Revoke host bridges → Stop accepting → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then core, then listener
//! - No background timers; the only long-lived tasks are connections

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
