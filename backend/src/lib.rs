//! # Candy Mint - backend for a Candy Machine mint page
//!
//! Reads the candy machine account over Solana JSON-RPC, derives its sale
//! state, waits for mint transactions to confirm and serves all of it to the
//! Leptos front-end. The mint workflow itself lives in `candy-mint-core`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Solana RPC │────▶│   Account   │────▶│  SaleState  │────▶│  HTTP API   │
//! │ (JSON-RPC)  │     │  (borsh)    │     │  (derived)  │     │  (axum)     │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use candy_mint::{load_config, RpcClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = load_config(None).unwrap();
//!     let client = RpcClient::from_config(&config);
//!     let state = client.fetch_sale_state(&config.candy_machine_id).await.unwrap();
//!     println!("{} items remaining", state.items_remaining);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Environment configuration
//! - [`candy_machine`] - Account layout and sale-state derivation
//! - [`rpc`] - JSON-RPC client and confirmation poller
//! - [`console`] - Terminal notification sink
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;

// Chain access
pub mod candy_machine;
pub mod rpc;

// Output
pub mod console;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{DecodeError, RpcError, ServerError, StateError};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::load_config;

// =============================================================================
// Re-exports - Candy machine
// =============================================================================

pub use candy_machine::{decode_account, derive_sale_state, CandyMachineAccount, CandyMachineData};

// =============================================================================
// Re-exports - RPC
// =============================================================================

pub use rpc::{AccountInfo, RpcClient};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::{LogEntry, LogLevel};
pub use console::ConsoleSink;

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
