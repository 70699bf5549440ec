//! Confirmation polling from the browser over Solana JSON-RPC.

use async_trait::async_trait;
use candy_mint_core::rpc::{first_settled, RpcRequest, RpcResponse, SignatureStatuses};
use candy_mint_core::{ConfirmationPoller, ConfirmationStatus, Connection, MintError, TxId};
use futures::future::{select, Either};
use futures::pin_mut;
use gloo_net::http::Request;
use gloo_timers::future::sleep;
use std::cell::Cell;
use std::future::Future;
use std::time::Duration;

use crate::types::{AppError, AppResult};

/// Polls `getSignatureStatuses` until the transaction settles or time runs out.
pub struct BrowserPoller {
    interval: Duration,
    next_id: Cell<u64>,
}

impl Default for BrowserPoller {
    fn default() -> Self {
        Self {
            interval: candy_mint_core::rpc::poll_interval(),
            next_id: Cell::new(1),
        }
    }
}

impl BrowserPoller {
    pub fn new() -> Self {
        Self::default()
    }

    async fn status(&self, tx_id: &TxId, connection: &Connection) -> AppResult<Option<ConfirmationStatus>> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let request = RpcRequest::get_signature_statuses(id, std::slice::from_ref(tx_id));
        let response = Request::post(&connection.endpoint)
            .json(&request)
            .map_err(|e| AppError::Parse(e.to_string()))?
            .send()
            .await?;

        let body: RpcResponse<SignatureStatuses> = response
            .json()
            .await
            .map_err(|e| AppError::Parse(format!("Invalid RPC response: {}", e)))?;
        let statuses = body
            .into_result()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(first_settled(&statuses))
    }

    /// Poll until the transaction settles. Never returns while it is pending.
    async fn poll_until_settled(&self, tx_id: &TxId, connection: &Connection, query_status: bool) -> ConfirmationStatus {
        loop {
            if query_status {
                match self.status(tx_id, connection).await {
                    Ok(Some(status)) => {
                        log::info!("🔎 {} settled, success={}", tx_id, status.is_success());
                        return status;
                    }
                    Ok(None) => log::debug!("⏳ {} not confirmed yet", tx_id),
                    Err(e) => log::warn!("⚠️ Status poll for {} failed: {}", tx_id, e),
                }
            }
            sleep(self.interval).await;
        }
    }
}

/// Resolve with `poll`, or with a timeout error if `deadline` fires first.
///
/// A request still in flight when the deadline fires is dropped.
pub async fn within_deadline<P, D>(poll: P, deadline: D) -> Result<ConfirmationStatus, MintError>
where
    P: Future<Output = ConfirmationStatus>,
    D: Future<Output = ()>,
{
    pin_mut!(poll);
    pin_mut!(deadline);

    match select(poll, deadline).await {
        Either::Left((status, _)) => Ok(status),
        Either::Right(((), _)) => Err(MintError::timeout()),
    }
}

#[async_trait(?Send)]
impl ConfirmationPoller for BrowserPoller {
    async fn await_confirmation(
        &self,
        tx_id: &TxId,
        timeout: Duration,
        connection: &Connection,
        query_status: bool,
    ) -> Result<ConfirmationStatus, MintError> {
        let poll = self.poll_until_settled(tx_id, connection, query_status);
        let result = within_deadline(poll, sleep(timeout)).await;

        if result.is_err() {
            log::warn!("⌛ Timed out after {}ms waiting for {}", timeout.as_millis(), tx_id);
        }
        result
    }
}
