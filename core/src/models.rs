//! Domain models shared by the backend and the mint page.
//!
//! - [`SaleState`] - Snapshot of a candy machine's sale
//! - [`Signer`] - Wallet identity able to sign transactions
//! - [`Connection`] - RPC endpoint plus commitment level
//! - [`TxId`] / [`ConfirmationStatus`] - Submitted transaction and its outcome
//! - [`Notification`] / [`Severity`] - What the user is told

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Lamports per SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

// =============================================================================
// Keys and identifiers
// =============================================================================

/// Base58 encoded account address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey(pub String);

impl PublicKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for display, e.g. `7xKX…9fQm`.
    pub fn short(&self) -> String {
        let key = &self.0;
        let len = key.chars().count();
        if len <= 10 {
            return key.clone();
        }
        let head: String = key.chars().take(4).collect();
        let tail: String = key.chars().skip(len - 4).collect();
        format!("{}…{}", head, tail)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transaction signature returned by the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(pub String);

impl TxId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Wallet identity
// =============================================================================

/// A connected wallet that can sign single and batched transactions.
///
/// Only exists when the wallet exposes a public key and both signing entry
/// points, see [`crate::services::WalletProvider::signer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signer {
    pub public_key: PublicKey,
}

// =============================================================================
// Connection
// =============================================================================

/// Commitment level used for RPC reads and confirmation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

/// Network connection handle: an RPC endpoint and a commitment level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub endpoint: String,
    #[serde(default)]
    pub commitment: Commitment,
}

impl Connection {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            commitment: Commitment::default(),
        }
    }

    pub fn with_commitment(mut self, commitment: Commitment) -> Self {
        self.commitment = commitment;
        self
    }
}

// =============================================================================
// Sale state
// =============================================================================

/// Identity verification required before minting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gatekeeper {
    /// Gatekeeper network issuing the gateway token.
    pub network: PublicKey,
    /// Whether the gateway token expires after one mint.
    pub expire_on_use: bool,
}

/// How a sale ends besides selling out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndSettingKind {
    /// `number` is a unix timestamp after which minting stops.
    Date,
    /// `number` caps how many items can be minted.
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndSettings {
    pub kind: EndSettingKind,
    pub number: u64,
}

/// Snapshot of a candy machine sale.
///
/// Fetched fresh on every refresh and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleState {
    /// Candy machine account.
    pub candy_machine_id: PublicKey,
    /// Program owning the candy machine account.
    pub program_id: PublicKey,
    pub is_active: bool,
    pub is_sold_out: bool,
    pub is_presale: bool,
    pub items_available: u64,
    pub items_redeemed: u64,
    pub items_remaining: u64,
    /// Price in lamports (or in the payment token's base units).
    pub price: u64,
    /// SPL token used for payment instead of SOL.
    #[serde(default)]
    pub token_mint: Option<PublicKey>,
    /// Wallet receiving the mint proceeds.
    pub treasury: PublicKey,
    /// Unix timestamp (seconds) the sale opens.
    #[serde(default)]
    pub go_live_date: Option<i64>,
    #[serde(default)]
    pub gatekeeper: Option<Gatekeeper>,
    #[serde(default)]
    pub end_settings: Option<EndSettings>,
}

impl SaleState {
    /// Gatekeeper network, when minting requires identity verification.
    pub fn gatekeeper_network(&self) -> Option<&PublicKey> {
        self.gatekeeper.as_ref().map(|g| &g.network)
    }

    /// Price formatted in SOL, e.g. `0.50`.
    pub fn price_sol(&self) -> String {
        format!("{:.2}", self.price as f64 / LAMPORTS_PER_SOL as f64)
    }
}

// =============================================================================
// Confirmation
// =============================================================================

/// Error slot of a confirmation status.
///
/// The chain reports either nothing, a synthetic flag, or an opaque
/// instruction error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusError {
    Flag(bool),
    Detail(Value),
}

impl StatusError {
    /// Whether this error slot signals a failure.
    pub fn is_failure(&self) -> bool {
        match self {
            StatusError::Flag(flag) => *flag,
            StatusError::Detail(Value::Null) => false,
            StatusError::Detail(_) => true,
        }
    }
}

/// Outcome of waiting for a transaction signature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationStatus {
    #[serde(default)]
    pub err: Option<StatusError>,
}

impl ConfirmationStatus {
    pub fn ok() -> Self {
        Self { err: None }
    }

    /// Failure status used when no transaction was submitted.
    pub fn failed() -> Self {
        Self {
            err: Some(StatusError::Flag(true)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.err.as_ref().map_or(true, |e| !e.is_failure())
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// Alert severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    /// CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Success => "alert-success",
            Severity::Error => "alert-error",
        }
    }

    /// Emoji prefix for console output.
    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Success => "✅",
            Severity::Error => "❌",
        }
    }
}

/// A message shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}
