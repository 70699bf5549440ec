//! Solana JSON-RPC client.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use candy_mint::rpc::RpcClient;
//!
//! let config = candy_mint::config::load_config(None)?;
//! let client = RpcClient::from_config(&config);
//! let state = client.fetch_sale_state(&config.candy_machine_id).await?;
//! println!("{} of {} left", state.items_remaining, state.items_available);
//! ```

pub mod confirm;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use candy_mint_core::rpc::{first_settled, RpcRequest, RpcResponse, SignatureStatuses, WithContext};
use candy_mint_core::{
    ChainStateReader, Commitment, ConfirmationStatus, Connection, MintConfig, PublicKey, RefreshError,
    SaleState, Signer, TxId,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::candy_machine::{decode_account, derive_sale_state, parse_pubkey};
use crate::error::{DecodeError, DecodeResult, RpcError, RpcResult, StateResult};

/// Account as returned by `getAccountInfo` with base64 encoding.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// `[data, "base64"]`
    pub data: (String, String),
    pub owner: String,
    pub lamports: u64,
    pub executable: bool,
}

impl AccountInfo {
    pub fn decode_data(&self) -> DecodeResult<Vec<u8>> {
        Ok(STANDARD.decode(&self.data.0)?)
    }
}

/// JSON-RPC client bound to one node.
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: String,
    commitment: Commitment,
    program_id: PublicKey,
    poll_interval: Duration,
    next_id: Arc<AtomicU64>,
}

impl RpcClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            commitment: Commitment::default(),
            program_id: PublicKey::new(candy_mint_core::config::CANDY_MACHINE_PROGRAM),
            poll_interval: candy_mint_core::rpc::poll_interval(),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn from_config(config: &MintConfig) -> Self {
        Self::new(config.rpc_host.clone())
            .with_commitment(config.commitment)
            .with_program_id(config.program_id.clone())
    }

    /// Program expected to own candy machine accounts.
    pub fn with_program_id(mut self, program_id: PublicKey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_commitment(mut self, commitment: Commitment) -> Self {
        self.commitment = commitment;
        self
    }

    /// Delay between two signature status polls.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Same client pointed at another node.
    pub fn for_connection(&self, connection: &Connection) -> Self {
        let mut client = self.clone();
        client.endpoint = connection.endpoint.clone();
        client.commitment = connection.commitment;
        client
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn call<T: DeserializeOwned>(&self, request: RpcRequest) -> RpcResult<T> {
        log::debug!("📡 {} → {}", request.method, self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| RpcError::InvalidResponse(format!("{}: {}", request.method, e)))?;

        Ok(body.into_result()?)
    }

    /// `getAccountInfo`; `None` when no account exists at `address`.
    pub async fn get_account_info(&self, address: &str) -> RpcResult<Option<AccountInfo>> {
        let request = RpcRequest::get_account_info(self.request_id(), address, self.commitment);
        let result: WithContext<Option<AccountInfo>> = self.call(request).await?;
        Ok(result.value)
    }

    /// Settled status of `tx_id`, `None` while it is still pending.
    pub async fn signature_status(&self, tx_id: &TxId) -> RpcResult<Option<ConfirmationStatus>> {
        let request = RpcRequest::get_signature_statuses(self.request_id(), std::slice::from_ref(tx_id));
        let statuses: SignatureStatuses = self.call(request).await?;
        Ok(first_settled(&statuses))
    }

    /// Read and decode the candy machine at `candy_machine_id`.
    pub async fn fetch_sale_state(&self, candy_machine_id: &PublicKey) -> StateResult<SaleState> {
        parse_pubkey(candy_machine_id.as_str())?;

        let info = self
            .get_account_info(candy_machine_id.as_str())
            .await?
            .ok_or_else(|| DecodeError::AccountNotFound(candy_machine_id.to_string()))?;

        if info.owner != self.program_id.as_str() {
            return Err(DecodeError::OwnerMismatch {
                expected: self.program_id.to_string(),
                actual: info.owner,
            }
            .into());
        }

        let account = decode_account(&info.decode_data()?)?;
        let now = chrono::Utc::now().timestamp();
        let state = derive_sale_state(candy_machine_id.clone(), self.program_id.clone(), &account, now);

        log::info!(
            "🍬 {}: {}/{} redeemed, active={}",
            candy_machine_id.short(),
            state.items_redeemed,
            state.items_available,
            state.is_active
        );
        Ok(state)
    }
}

#[async_trait(?Send)]
impl ChainStateReader for RpcClient {
    async fn fetch(
        &self,
        _signer: &Signer,
        candy_machine_id: &PublicKey,
        connection: &Connection,
    ) -> Result<SaleState, RefreshError> {
        self.for_connection(connection)
            .fetch_sale_state(candy_machine_id)
            .await
            .map_err(|e| RefreshError::Fetch(e.to_string()))
    }
}
