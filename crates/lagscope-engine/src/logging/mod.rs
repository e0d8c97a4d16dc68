//! Logging utilities.
//!
//! Centralizes logger initialization behind the standard `log` facade.
//! The periodic pacing report is user-facing console output and does not go
//! through the logger; only engine diagnostics do.

mod init;

pub use init::{init_logging, LoggingConfig};
