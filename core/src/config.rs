//! Mint page configuration.
//!
//! Read from the environment on the backend and served to the browser at
//! `/api/config`.
//!
//! | Variable                   | Default                              |
//! |----------------------------|--------------------------------------|
//! | `CANDY_MACHINE_ID`         | required                             |
//! | `SOLANA_NETWORK`           | `devnet`                             |
//! | `SOLANA_RPC_HOST`          | `https://api.devnet.solana.com`      |
//! | `CANDY_START_DATE`         | unset                                |
//! | `TX_TIMEOUT_MS`            | `30000`                              |
//! | `CANDY_MACHINE_PROGRAM_ID` | Candy Machine v2 program             |

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::models::{Commitment, Connection, PublicKey};

/// Candy Machine v2 program id.
pub const CANDY_MACHINE_PROGRAM: &str = "cndy3Z4yapfJBmL3ShUp5exZKqR3z33thTzeNMm2gRZ";

pub const DEFAULT_NETWORK: &str = "devnet";

pub const DEFAULT_RPC_HOST: &str = "https://api.devnet.solana.com";

/// How long the poller waits for a mint to confirm.
pub const DEFAULT_TX_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintConfig {
    pub candy_machine_id: PublicKey,
    pub network: String,
    pub rpc_host: String,
    /// Unix timestamp (seconds) advertised as the sale start.
    #[serde(default)]
    pub start_date: Option<i64>,
    pub tx_timeout_ms: u64,
    pub program_id: PublicKey,
    #[serde(default)]
    pub commitment: Commitment,
}

impl MintConfig {
    /// Config with defaults for everything but the candy machine.
    pub fn new(candy_machine_id: PublicKey) -> Self {
        Self {
            candy_machine_id,
            network: DEFAULT_NETWORK.to_string(),
            rpc_host: DEFAULT_RPC_HOST.to_string(),
            start_date: None,
            tx_timeout_ms: DEFAULT_TX_TIMEOUT_MS,
            program_id: PublicKey::new(CANDY_MACHINE_PROGRAM),
            commitment: Commitment::default(),
        }
    }

    /// Read from process environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let candy_machine_id = get("CANDY_MACHINE_ID").ok_or(ConfigError::Missing("CANDY_MACHINE_ID"))?;
        let mut config = Self::new(PublicKey::new(candy_machine_id));

        if let Some(network) = get("SOLANA_NETWORK") {
            config.network = network;
        }
        if let Some(rpc_host) = get("SOLANA_RPC_HOST") {
            config.rpc_host = rpc_host;
        }
        if let Some(start) = get("CANDY_START_DATE") {
            let start = start.parse::<i64>().map_err(|e| ConfigError::Invalid {
                var: "CANDY_START_DATE",
                message: e.to_string(),
            })?;
            config.start_date = Some(start);
        }
        if let Some(timeout) = get("TX_TIMEOUT_MS") {
            config.tx_timeout_ms = timeout.parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: "TX_TIMEOUT_MS",
                message: e.to_string(),
            })?;
        }
        if let Some(program_id) = get("CANDY_MACHINE_PROGRAM_ID") {
            config.program_id = PublicKey::new(program_id);
        }

        Ok(config)
    }

    pub fn with_rpc_host(mut self, rpc_host: impl Into<String>) -> Self {
        self.rpc_host = rpc_host.into();
        self
    }

    pub fn connection(&self) -> Connection {
        Connection::new(self.rpc_host.clone()).with_commitment(self.commitment)
    }

    pub fn tx_timeout(&self) -> Duration {
        Duration::from_millis(self.tx_timeout_ms)
    }
}
