//! Mint submission through the Candy Machine JS SDK.
//!
//! The SDK builds the mint transaction, has the wallet sign it and sends it.
//! Rejections are mapped field by field onto [`MintError`] so the classifier
//! sees exactly what the program reported.

use async_trait::async_trait;
use candy_mint_core::{MintError, MintSubmitter, PublicKey, SaleState, TxId};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Submits one mint per call via `window.candyMachineSdk`.
pub struct CandyMachineSubmitter {
    rpc_host: String,
}

impl CandyMachineSubmitter {
    pub fn new(rpc_host: impl Into<String>) -> Self {
        Self {
            rpc_host: rpc_host.into(),
        }
    }
}

#[async_trait(?Send)]
impl MintSubmitter for CandyMachineSubmitter {
    async fn submit(&self, sale_state: &SaleState, payer: &PublicKey) -> Result<Vec<TxId>, MintError> {
        log::info!("📤 Minting from {} for {}", sale_state.candy_machine_id.short(), payer.short());

        let state = serde_wasm_bindgen::to_value(sale_state)
            .map_err(|e| MintError::message(format!("Failed to serialize sale state: {}", e)))?;

        let result = JsFuture::from(mint_one_token(&self.rpc_host, state, payer.as_str()))
            .await
            .map_err(|e| {
                let err = mint_error_from_js(&e);
                log::warn!("❌ Mint rejected: {}", err);
                err
            })?;

        let ids: Vec<Option<TxId>> = serde_wasm_bindgen::from_value(result)
            .map_err(|e| MintError::message(format!("Unexpected SDK result: {}", e)))?;

        Ok(leading_ids(ids))
    }
}

/// Ids up to the first missing one.
fn leading_ids(ids: Vec<Option<TxId>>) -> Vec<TxId> {
    ids.into_iter().map_while(std::convert::identity).collect()
}

/// Read `code`, `msg` and `message` off a rejected SDK promise.
pub fn mint_error_from_js(err: &JsValue) -> MintError {
    let get = |name: &str| js_sys::Reflect::get(err, &JsValue::from_str(name)).ok();

    MintError {
        code: get("code").and_then(|v| v.as_f64()).and_then(program_code),
        msg: get("msg").and_then(|v| v.as_string()),
        message: get("message")
            .and_then(|v| v.as_string())
            .or_else(|| err.as_string()),
        timeout: false,
    }
}

/// Program error codes are small non-negative integers.
fn program_code(value: f64) -> Option<u32> {
    (value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value)).then_some(value as u32)
}

#[wasm_bindgen(module = "/src/js/candy-machine.js")]
extern "C" {
    #[wasm_bindgen(js_name = "mintOneToken")]
    fn mint_one_token(rpc_host: &str, sale_state: JsValue, payer: &str) -> js_sys::Promise;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_code() {
        assert_eq!(program_code(311.0), Some(311));
        assert_eq!(program_code(0.0), Some(0));
        assert_eq!(program_code(-1.0), None);
        assert_eq!(program_code(3.5), None);
        assert_eq!(program_code(f64::NAN), None);
    }

    #[test]
    fn test_only_leading_ids_are_kept() {
        let ids = leading_ids(vec![Some(TxId::new("a")), Some(TxId::new("b"))]);
        assert_eq!(ids, vec![TxId::new("a"), TxId::new("b")]);

        // A missing first id means nothing was submitted.
        assert!(leading_ids(vec![None, Some(TxId::new("b"))]).is_empty());
        assert!(leading_ids(vec![]).is_empty());
    }
}
