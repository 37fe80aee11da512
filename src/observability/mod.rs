//! Observability subsystem for hearthdb
//!
//! Structured logging only: the store is single-threaded and
//! synchronous, so there are no metrics loops or background sinks.
//! Log lines appear on the load/persist boundaries and on fatal
//! paths, never inside pure tree code, which stays deterministic
//! and silent.

mod logger;

pub use logger::{Logger, Severity};
