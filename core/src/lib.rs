//! # Candy Mint Core - mint workflow for a Candy Machine drop
//!
//! Platform-neutral part of the mint page: the attempt controller, the error
//! classification table, the sale-state refresher and the notification state.
//! No I/O happens here; the backend (native) and the frontend (wasm) plug
//! their adapters into the traits in [`services`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Trigger   │────▶│  Submitter  │────▶│   Poller    │────▶│  Classifier │
//! │  (button)   │     │  (wallet)   │     │ (sig status)│     │  (→ alert)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Mint, refresh, transition and config errors
//! - [`models`] - Sale state, keys, confirmation status, notifications
//! - [`classify`] - Failure to user message table
//! - [`phase`] - Mint phase state machine
//! - [`services`] - Collaborator traits
//! - [`controller`] - Mint attempt controller
//! - [`refresher`] - Keyed sale-state refresh
//! - [`notification`] - Snackbar state
//! - [`config`] - Page configuration
//! - [`rpc`] - Solana JSON-RPC wire types

// Core modules
pub mod error;
pub mod models;

// Workflow
pub mod classify;
pub mod controller;
pub mod phase;
pub mod services;

// Sale state
pub mod refresher;

// Presentation
pub mod notification;

// Configuration and wire
pub mod config;
pub mod rpc;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, MintError, RefreshError, TransitionError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    Commitment,
    ConfirmationStatus,
    Connection,
    EndSettingKind,
    EndSettings,
    Gatekeeper,
    Notification,
    PublicKey,
    SaleState,
    Severity,
    Signer,
    StatusError,
    TxId,
};

// =============================================================================
// Re-exports - Workflow
// =============================================================================

pub use classify::{classify_error, classify_status, Verdict};
pub use controller::{MintController, MintReport, MintServices, PhaseObserver, SkipReason};
pub use phase::{step, MintEvent, MintPhase, Outcome};
pub use services::{
    ChainStateReader,
    ConfirmationPoller,
    IdentityGate,
    MintSubmitter,
    NoGate,
    NotificationSink,
    Reloader,
    WalletProvider,
};

// =============================================================================
// Re-exports - Refresh, notification, config
// =============================================================================

pub use config::MintConfig;
pub use notification::{AlertState, AlertTicket};
pub use refresher::{RefreshKey, RefreshOutcome, SaleStateRefresher};
