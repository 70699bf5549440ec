//! Error types for the mint backend.
//!
//! - [`RpcError`] - JSON-RPC transport and protocol errors
//! - [`DecodeError`] - Candy machine account decoding errors
//! - [`StateError`] - Sale-state lookup (wraps both of the above)
//! - [`ServerError`] - HTTP handler errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use axum::http::StatusCode;
use candy_mint_core::rpc::RpcErrorObject;
use thiserror::Error;

// =============================================================================
// RPC Errors
// =============================================================================

/// Errors talking to the Solana RPC node.
#[derive(Debug, Error)]
pub enum RpcError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The answer did not have the expected shape.
    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),
}

impl From<RpcErrorObject> for RpcError {
    fn from(err: RpcErrorObject) -> Self {
        RpcError::Rpc {
            code: err.code,
            message: err.message,
        }
    }
}

// =============================================================================
// Decode Errors
// =============================================================================

/// Errors decoding the candy machine account.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No account at this address.
    #[error("Candy machine account not found: {0}")]
    AccountNotFound(String),

    /// Account exists but belongs to another program.
    #[error("Account is owned by {actual}, expected {expected}")]
    OwnerMismatch { expected: String, actual: String },

    /// First eight bytes are not the candy machine discriminator.
    #[error("Account is not a candy machine (bad discriminator)")]
    Discriminator,

    /// Borsh layout did not match.
    #[error("Malformed candy machine data: {0}")]
    Borsh(#[from] std::io::Error),

    /// Account data was not valid base64.
    #[error("Invalid base64 account data: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Not a base58 encoded 32 byte key.
    #[error("Invalid public key: {0}")]
    Pubkey(String),
}

// =============================================================================
// State Errors
// =============================================================================

/// Errors while building a sale state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Sale-state lookup failed.
    #[error("Sale state error: {0}")]
    State(#[from] StateError),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::State(StateError::Decode(DecodeError::Pubkey(_))) => StatusCode::BAD_REQUEST,
            ServerError::State(StateError::Decode(DecodeError::AccountNotFound(_))) => {
                StatusCode::NOT_FOUND
            }
            ServerError::State(StateError::Decode(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::State(StateError::Rpc(_)) => StatusCode::BAD_GATEWAY,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for RPC calls.
pub type RpcResult<T> = Result<T, RpcError>;

/// Result type for account decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for sale-state lookups.
pub type StateResult<T> = Result<T, StateError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // DecodeError -> StateError -> ServerError
        let decode_err = DecodeError::AccountNotFound("cm111".into());
        let state_err: StateError = decode_err.into();
        let server_err: ServerError = state_err.into();
        assert!(server_err.to_string().contains("cm111"));
        assert_eq!(server_err.status(), StatusCode::NOT_FOUND);

        // RpcErrorObject -> RpcError -> StateError
        let rpc_err: RpcError = RpcErrorObject {
            code: -32602,
            message: "Invalid param".into(),
        }
        .into();
        let state_err: StateError = rpc_err.into();
        assert!(state_err.to_string().contains("-32602"));
        assert_eq!(ServerError::from(state_err).status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_owner_mismatch_format() {
        let err = DecodeError::OwnerMismatch {
            expected: "cndy".into(),
            actual: "11111111111111111111111111111111".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cndy"));
        assert!(msg.contains("11111111111111111111111111111111"));
        assert_eq!(
            ServerError::from(StateError::from(err)).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
