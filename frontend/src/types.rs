//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Wallet Types** - Browser wallet snapshot
//! - **Error Types** - Frontend error handling

use candy_mint_core::{PublicKey, WalletProvider};
use std::fmt;

// =============================================================================
// Wallet Types
// =============================================================================

/// Snapshot of the browser wallet.
///
/// Refreshed after connect and disconnect; the mint controller reads it
/// through [`WalletProvider`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletState {
    pub connected: bool,
    /// Base58 address of the selected account
    pub public_key: Option<PublicKey>,
    pub can_sign_transaction: bool,
    pub can_sign_all_transactions: bool,
    /// Wallet extension name (Phantom, Solflare…)
    pub name: Option<String>,
}

impl WalletState {
    /// Shortened address for the header, or the connect prompt.
    pub fn label(&self) -> String {
        match self.public_key {
            Some(ref key) if self.connected => key.short(),
            _ => "Connect Wallet".to_string(),
        }
    }
}

impl WalletProvider for WalletState {
    fn connected(&self) -> bool {
        self.connected
    }

    fn public_key(&self) -> Option<PublicKey> {
        self.public_key.clone()
    }

    fn can_sign_transaction(&self) -> bool {
        self.can_sign_transaction
    }

    fn can_sign_all_transactions(&self) -> bool {
        self.can_sign_all_transactions
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// Unified error type for all frontend operations.
#[derive(Clone, Debug)]
pub enum AppError {
    /// Wallet connection failed.
    Wallet(String),
    /// Network/HTTP error.
    Network(String),
    /// Mint submission failed before reaching the chain.
    Submit(String),
    /// Invalid data format.
    Parse(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Wallet(msg) => write!(f, "Wallet error: {}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Submit(msg) => write!(f, "Submit error: {}", msg),
            AppError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<gloo_net::Error> for AppError {
    fn from(err: gloo_net::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
