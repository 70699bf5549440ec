//! Collaborator seams of the mint workflow.
//!
//! The workflow runs on a single-threaded event loop (the browser), so the
//! async traits are `?Send` and collaborators are shared through `Rc`.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::{MintError, RefreshError};
use crate::models::{ConfirmationStatus, Connection, Notification, PublicKey, SaleState, Signer, TxId};

/// Browser wallet: connection status, identity and signing capability.
pub trait WalletProvider {
    fn connected(&self) -> bool;

    fn public_key(&self) -> Option<PublicKey>;

    fn can_sign_transaction(&self) -> bool;

    fn can_sign_all_transactions(&self) -> bool;

    /// Signing identity, present only when the wallet exposes a key and both
    /// signing entry points.
    fn signer(&self) -> Option<Signer> {
        if !self.can_sign_transaction() || !self.can_sign_all_transactions() {
            return None;
        }
        self.public_key().map(|public_key| Signer { public_key })
    }
}

/// Reads the current sale state of a candy machine.
#[async_trait(?Send)]
pub trait ChainStateReader {
    async fn fetch(
        &self,
        signer: &Signer,
        candy_machine_id: &PublicKey,
        connection: &Connection,
    ) -> Result<SaleState, RefreshError>;
}

/// Builds, signs and sends one mint transaction.
#[async_trait(?Send)]
pub trait MintSubmitter {
    /// Returns the submitted transaction ids; only the first is used.
    async fn submit(&self, sale_state: &SaleState, payer: &PublicKey) -> Result<Vec<TxId>, MintError>;
}

/// Waits until a transaction is final or the timeout elapses.
#[async_trait(?Send)]
pub trait ConfirmationPoller {
    async fn await_confirmation(
        &self,
        tx_id: &TxId,
        timeout: Duration,
        connection: &Connection,
        query_status: bool,
    ) -> Result<ConfirmationStatus, MintError>;
}

/// Holds the one visible notification.
pub trait NotificationSink {
    fn show(&self, notification: Notification);

    fn dismiss(&self);
}

/// Identity/captcha verification attached to gated sales.
pub trait IdentityGate {
    /// Whether minting from this sale requires the check.
    fn is_required(&self, sale_state: &SaleState) -> bool {
        sale_state.gatekeeper.is_some()
    }

    /// Kick off the check. Fire-and-forget.
    fn request_check(&self, sale_state: &SaleState);
}

/// Gate for sales without identity verification.
pub struct NoGate;

impl IdentityGate for NoGate {
    fn is_required(&self, _sale_state: &SaleState) -> bool {
        false
    }

    fn request_check(&self, _sale_state: &SaleState) {}
}

/// Reloads the page to resync with on-chain state.
pub trait Reloader {
    fn reload(&self);
}
