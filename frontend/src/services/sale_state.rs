//! Sale state and page configuration from the mint backend.

use async_trait::async_trait;
use candy_mint_core::{ChainStateReader, Connection, MintConfig, PublicKey, RefreshError, SaleState, Signer};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use crate::types::{AppError, AppResult};

/// Reads sale state through `GET /api/sale-state`.
///
/// The backend reads and decodes the account through its configured
/// `SOLANA_RPC_HOST`; the RPC endpoint is fixed server-side and is never
/// sent with the request. The `connection` passed to [`ChainStateReader::fetch`]
/// is ignored here: a change of endpoint still starts a new read through the
/// refresh key, against the backend's node.
pub struct BackendStateReader {
    backend_url: String,
}

impl BackendStateReader {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
        }
    }

    pub fn sale_state_url(&self, candy_machine_id: &PublicKey) -> String {
        format!(
            "{}/api/sale-state?candyMachineId={}",
            self.backend_url,
            candy_machine_id.as_str()
        )
    }
}

#[async_trait(?Send)]
impl ChainStateReader for BackendStateReader {
    async fn fetch(
        &self,
        _signer: &Signer,
        candy_machine_id: &PublicKey,
        _connection: &Connection,
    ) -> Result<SaleState, RefreshError> {
        get_json(&self.sale_state_url(candy_machine_id))
            .await
            .map_err(|e| RefreshError::Fetch(e.to_string()))
    }
}

/// Drop configuration served by the backend.
pub async fn fetch_config(backend_url: &str) -> AppResult<MintConfig> {
    get_json(&format!("{}/api/config", backend_url)).await
}

async fn get_json<T: DeserializeOwned>(url: &str) -> AppResult<T> {
    let response = Request::get(url).send().await?;

    if !response.ok() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::Network(format!(
            "Server error ({}): {}",
            response.status(),
            error_text
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Parse(format!("Failed to parse response: {}", e)))
}
