//! Solana JSON-RPC wire types shared by the native and browser clients.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;

use crate::models::{Commitment, ConfirmationStatus, StatusError, TxId};

/// Delay between two `getSignatureStatuses` polls.
pub const POLL_INTERVAL_MS: u64 = 2000;

pub fn poll_interval() -> Duration {
    Duration::from_millis(POLL_INTERVAL_MS)
}

// =============================================================================
// Envelope
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: Value,
}

impl RpcRequest {
    pub fn new(id: u64, method: &'static str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }

    /// `getAccountInfo` with base64 data.
    pub fn get_account_info(id: u64, address: &str, commitment: Commitment) -> Self {
        Self::new(
            id,
            "getAccountInfo",
            json!([address, {"encoding": "base64", "commitment": commitment.as_str()}]),
        )
    }

    /// `getSignatureStatuses` searching the full transaction history.
    pub fn get_signature_statuses(id: u64, signatures: &[TxId]) -> Self {
        Self::new(
            id,
            "getSignatureStatuses",
            json!([signatures, {"searchTransactionHistory": true}]),
        )
    }
}

/// Error object of a failed JSON-RPC call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

impl fmt::Display for RpcErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RPC error {}: {}", self.code, self.message)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RpcResponse<T> {
    Success { result: T },
    Failure { error: RpcErrorObject },
}

impl<T> RpcResponse<T> {
    pub fn into_result(self) -> Result<T, RpcErrorObject> {
        match self {
            RpcResponse::Success { result } => Ok(result),
            RpcResponse::Failure { error } => Err(error),
        }
    }
}

/// `{context, value}` wrapper most RPC methods answer with.
#[derive(Debug, Clone, Deserialize)]
pub struct WithContext<T> {
    pub context: RpcContext,
    pub value: T,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RpcContext {
    pub slot: u64,
}

// =============================================================================
// Signature status
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    pub slot: u64,
    /// `None` once the block is rooted.
    pub confirmations: Option<u64>,
    #[serde(default)]
    pub err: Option<Value>,
    #[serde(default)]
    pub confirmation_status: Option<Commitment>,
}

impl SignatureStatus {
    /// The final status, or `None` while the transaction is still pending.
    pub fn settled(&self) -> Option<ConfirmationStatus> {
        if let Some(err) = self.err.as_ref().filter(|e| !e.is_null()) {
            return Some(ConfirmationStatus {
                err: Some(StatusError::Detail(err.clone())),
            });
        }
        if self.confirmations.is_none() {
            return Some(ConfirmationStatus::ok());
        }
        match self.confirmation_status {
            Some(Commitment::Confirmed) | Some(Commitment::Finalized) => Some(ConfirmationStatus::ok()),
            _ => None,
        }
    }
}

/// Result of `getSignatureStatuses`. Unknown signatures come back as `null`.
pub type SignatureStatuses = WithContext<Vec<Option<SignatureStatus>>>;

/// Settled status of the first signature in a `getSignatureStatuses` answer.
pub fn first_settled(statuses: &SignatureStatuses) -> Option<ConfirmationStatus> {
    statuses
        .value
        .first()
        .and_then(Option::as_ref)
        .and_then(SignatureStatus::settled)
}
