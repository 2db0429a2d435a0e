//! Task board fed by the gateway's sanitized output.
//!
//! The board only consumes data that has crossed the gateway boundary and
//! never re-validates it. Rendering is left to the client.

pub mod dashboard;
pub mod task;

pub use dashboard::Dashboard;
pub use task::{derive_tasks, Priority, Task, TaskKind, TaskStatus};
