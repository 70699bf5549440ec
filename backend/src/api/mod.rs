//! HTTP API module.
//!
//! This module provides the HTTP server, log streaming and API types for the
//! mint backend.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::{BroadcastLogger, LogEntry, LogLevel, LOG_BROADCASTER};
pub use server::{router, start_server, AppState};
pub use types::{error_response, SaleStateQuery};
