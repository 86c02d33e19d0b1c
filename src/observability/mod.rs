//! Observability
//!
//! Structured logging for lifecycle runs. One event per line, synchronous,
//! deterministic field ordering so output is diffable across runs.

mod logger;

pub use logger::{Logger, Severity};
