//! Error types for the mint workflow.
//!
//! - [`MintError`] - Failure reported by the submitter or the poller, the
//!   input of [`crate::classify`]
//! - [`RefreshError`] - Sale-state refresh failures (logged, never shown)
//! - [`TransitionError`] - Illegal mint phase transition
//! - [`ConfigError`] - Missing or malformed configuration values

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Mint Errors
// =============================================================================

/// Failure raised while submitting or confirming a mint transaction.
///
/// Mirrors what the wallet SDK hands back: a program error carries a numeric
/// `code` and an explicit `msg`, a transport or simulation failure only a raw
/// `message`, and a confirmation timeout carries nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintError {
    /// Structured program error code (e.g. 311 for an empty candy machine).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    /// Explicit message attached by the program.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// Raw human-readable error text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Set by the confirmation poller when the deadline passed.
    #[serde(default)]
    pub timeout: bool,
}

impl MintError {
    /// Program error with a code and its explicit message.
    pub fn program(code: u32, msg: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            msg: Some(msg.into()),
            ..Self::default()
        }
    }

    /// Unstructured failure carrying only raw text.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Confirmation deadline elapsed.
    pub fn timeout() -> Self {
        Self {
            timeout: true,
            ..Self::default()
        }
    }

    /// Attach a structured code.
    pub fn with_code(mut self, code: u32) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach an explicit program message.
    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }

    /// True when neither `msg` nor `message` carries any text.
    pub fn is_silent(&self) -> bool {
        self.msg.as_deref().map_or(true, str::is_empty)
            && self.message.as_deref().map_or(true, str::is_empty)
    }
}

impl fmt::Display for MintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.timeout {
            return write!(f, "confirmation timed out");
        }
        match (self.code, self.msg.as_deref(), self.message.as_deref()) {
            (Some(code), Some(msg), _) => write!(f, "program error {}: {}", code, msg),
            (Some(code), None, Some(message)) => write!(f, "program error {}: {}", code, message),
            (Some(code), None, None) => write!(f, "program error {}", code),
            (None, Some(msg), _) => write!(f, "{}", msg),
            (None, None, Some(message)) => write!(f, "{}", message),
            (None, None, None) => write!(f, "unknown mint error"),
        }
    }
}

impl std::error::Error for MintError {}

// =============================================================================
// Refresh Errors
// =============================================================================

/// Errors raised while refreshing the sale state.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The chain state reader failed.
    #[error("Failed to fetch sale state: {0}")]
    Fetch(String),

    /// One of signer, account or connection is not available yet.
    #[error("Refresh input missing: {0}")]
    MissingInput(&'static str),
}

// =============================================================================
// Transition Errors
// =============================================================================

/// Illegal transition of the mint phase machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The event is not accepted in the current phase.
    #[error("Event '{event}' not allowed in phase '{phase}'")]
    NotAllowed {
        phase: &'static str,
        event: &'static str,
    },
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required variable not set.
    #[error("Missing {0} environment variable")]
    Missing(&'static str),

    /// Variable present but unparseable.
    #[error("Invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for refresh operations.
pub type RefreshResult<T> = Result<T, RefreshError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
