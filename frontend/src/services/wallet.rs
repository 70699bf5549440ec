//! Solana browser wallet (Phantom, Solflare and other `window.solana` providers).

use candy_mint_core::PublicKey;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::types::{AppError, AppResult, WalletState};

/// Wrapper around the injected `window.solana` provider.
pub struct SolanaWallet;

impl SolanaWallet {
    /// Whether a compatible extension is installed.
    pub fn is_available() -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };

        let has_provider = js_sys::Reflect::get(&window, &JsValue::from_str("solana"))
            .map(|v| !v.is_null() && !v.is_undefined())
            .unwrap_or(false);

        if !has_provider {
            log::warn!("⚠️  No Solana wallet extension found");
        }
        has_provider
    }

    /// Ask the extension to connect and return its state.
    pub async fn connect() -> AppResult<WalletState> {
        if !Self::is_available() {
            return Err(AppError::Wallet(
                "No Solana wallet found. Please install Phantom or Solflare.".to_string(),
            ));
        }

        log::info!("🔌 Connecting to wallet...");
        let result = JsFuture::from(connect_wallet())
            .await
            .map_err(|e| AppError::Wallet(js_error_message(&e)))?;

        let state = wallet_state_from_js(&result);
        match state.public_key {
            Some(ref key) => log::info!("✅ Connected to wallet: {}", key),
            None => return Err(AppError::Wallet("Wallet returned no public key".to_string())),
        }
        Ok(state)
    }

    pub async fn disconnect() -> AppResult<()> {
        JsFuture::from(disconnect_wallet())
            .await
            .map_err(|e| AppError::Wallet(js_error_message(&e)))?;
        log::info!("👋 Wallet disconnected");
        Ok(())
    }

    /// Current provider state without prompting the user.
    pub fn current() -> WalletState {
        if !Self::is_available() {
            return WalletState::default();
        }
        wallet_state_from_js(&wallet_state())
    }
}

fn wallet_state_from_js(value: &JsValue) -> WalletState {
    let get = |name: &str| js_sys::Reflect::get(value, &JsValue::from_str(name)).ok();

    WalletState {
        connected: get("connected").and_then(|v| v.as_bool()).unwrap_or(false),
        public_key: get("publicKey").and_then(|v| v.as_string()).map(PublicKey::new),
        can_sign_transaction: get("canSignTransaction").and_then(|v| v.as_bool()).unwrap_or(false),
        can_sign_all_transactions: get("canSignAllTransactions")
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        name: get("name").and_then(|v| v.as_string()),
    }
}

/// Best effort text of a rejected JS promise.
pub fn js_error_message(err: &JsValue) -> String {
    js_sys::Reflect::get(err, &"message".into())
        .ok()
        .and_then(|v| v.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "Unknown JS error".to_string())
}

#[wasm_bindgen(module = "/src/js/wallet.js")]
extern "C" {
    #[wasm_bindgen(js_name = "connectWallet")]
    fn connect_wallet() -> js_sys::Promise;

    #[wasm_bindgen(js_name = "disconnectWallet")]
    fn disconnect_wallet() -> js_sys::Promise;

    #[wasm_bindgen(js_name = "walletState")]
    fn wallet_state() -> JsValue;
}
