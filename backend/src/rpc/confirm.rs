//! Transaction confirmation by signature status polling.

use async_trait::async_trait;
use candy_mint_core::{ConfirmationPoller, ConfirmationStatus, Connection, MintError, TxId};
use std::time::Duration;

use super::RpcClient;

impl RpcClient {
    /// Poll `getSignatureStatuses` until `tx_id` settles or `timeout` elapses.
    ///
    /// Poll failures are logged and retried. When `query_status` is false no
    /// status is ever requested and the call only resolves by timing out.
    pub async fn await_confirmation(
        &self,
        tx_id: &TxId,
        timeout: Duration,
        query_status: bool,
    ) -> Result<ConfirmationStatus, MintError> {
        let poll = async {
            loop {
                if query_status {
                    match self.signature_status(tx_id).await {
                        Ok(Some(status)) => {
                            log::info!("🔎 {} settled, success={}", tx_id, status.is_success());
                            return status;
                        }
                        Ok(None) => log::debug!("⏳ {} not confirmed yet", tx_id),
                        Err(e) => log::warn!("⚠️ Status poll for {} failed: {}", tx_id, e),
                    }
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        };

        tokio::time::timeout(timeout, poll).await.map_err(|_| {
            log::warn!("⌛ Timed out after {}ms waiting for {}", timeout.as_millis(), tx_id);
            MintError::timeout()
        })
    }
}

#[async_trait(?Send)]
impl ConfirmationPoller for RpcClient {
    async fn await_confirmation(
        &self,
        tx_id: &TxId,
        timeout: Duration,
        connection: &Connection,
        query_status: bool,
    ) -> Result<ConfirmationStatus, MintError> {
        RpcClient::await_confirmation(&self.for_connection(connection), tx_id, timeout, query_status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::stub;
    use candy_mint_core::classify::{classify_error, classify_status, MSG_CONFIRM_FAILED, MSG_SUCCESS, MSG_TIMEOUT};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const SIG: &str = "5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW";

    fn statuses_reply(request: &Value, status: Value) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": request["id"],
            "result": {"context": {"slot": 90}, "value": [status]}
        })
    }

    fn client(url: &str) -> RpcClient {
        RpcClient::new(url).with_poll_interval(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_pending_then_confirmed() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = polls.clone();
        let node = stub::spawn(move |req| {
            let status = match counter.fetch_add(1, Ordering::SeqCst) {
                0 => Value::Null,
                1 => json!({"slot": 90, "confirmations": 0, "err": null, "confirmationStatus": "processed"}),
                _ => json!({"slot": 90, "confirmations": 3, "err": null, "confirmationStatus": "confirmed"}),
            };
            statuses_reply(req, status)
        })
        .await;

        let status = client(&node.url)
            .await_confirmation(&TxId::new(SIG), Duration::from_secs(5), true)
            .await
            .unwrap();

        assert!(status.is_success());
        assert_eq!(classify_status(&status).notification.message, MSG_SUCCESS);
        assert_eq!(polls.load(Ordering::SeqCst), 3);

        let calls = node.calls();
        assert_eq!(calls[0]["method"], "getSignatureStatuses");
        assert_eq!(calls[0]["params"][0][0], SIG);
    }

    #[tokio::test]
    async fn test_failed_transaction() {
        let node = stub::spawn(|req| {
            statuses_reply(
                req,
                json!({
                    "slot": 90, "confirmations": 1,
                    "err": {"InstructionError": [4, {"Custom": 311}]},
                    "confirmationStatus": "confirmed"
                }),
            )
        })
        .await;

        let status = client(&node.url)
            .await_confirmation(&TxId::new(SIG), Duration::from_secs(5), true)
            .await
            .unwrap();

        assert!(!status.is_success());
        assert_eq!(classify_status(&status).notification.message, MSG_CONFIRM_FAILED);
    }

    #[tokio::test]
    async fn test_timeout_classifies_as_timeout() {
        let node = stub::spawn(|req| statuses_reply(req, Value::Null)).await;

        let err = client(&node.url)
            .await_confirmation(&TxId::new(SIG), Duration::from_millis(200), true)
            .await
            .unwrap_err();

        assert!(err.timeout);
        assert_eq!(classify_error(&err).notification.message, MSG_TIMEOUT);
        assert!(!node.calls().is_empty());
    }

    #[tokio::test]
    async fn test_poll_errors_are_retried() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = polls.clone();
        let node = stub::spawn(move |req| match counter.fetch_add(1, Ordering::SeqCst) {
            0 => json!({"jsonrpc": "2.0", "id": req["id"], "error": {"code": -32005, "message": "Node is behind"}}),
            _ => statuses_reply(req, json!({"slot": 90, "confirmations": null, "err": null, "confirmationStatus": "finalized"})),
        })
        .await;

        let status = client(&node.url)
            .await_confirmation(&TxId::new(SIG), Duration::from_secs(5), true)
            .await
            .unwrap();

        assert!(status.is_success());
        assert_eq!(polls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_without_status_queries_only_times_out() {
        let node = stub::spawn(|req| {
            statuses_reply(req, json!({"slot": 90, "confirmations": null, "err": null, "confirmationStatus": "finalized"}))
        })
        .await;

        let err = client(&node.url)
            .await_confirmation(&TxId::new(SIG), Duration::from_millis(40), false)
            .await
            .unwrap_err();

        assert!(err.timeout);
        assert!(node.calls().is_empty());
    }

    #[tokio::test]
    async fn test_poller_trait_uses_connection() {
        let node = stub::spawn(|req| {
            statuses_reply(req, json!({"slot": 90, "confirmations": 5, "err": null, "confirmationStatus": "confirmed"}))
        })
        .await;
        let poller = client("http://127.0.0.1:9/");

        let status = ConfirmationPoller::await_confirmation(
            &poller,
            &TxId::new(SIG),
            Duration::from_secs(5),
            &Connection::new(node.url.clone()),
            true,
        )
        .await
        .unwrap();

        assert!(status.is_success());
        assert_eq!(node.calls().len(), 1);
    }
}
