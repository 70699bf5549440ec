//! Mint attempt controller.
//!
//! Drives one attempt through [`MintPhase`]: submit, confirm, classify,
//! notify, and always back to `Idle`. A trigger while an attempt is in flight
//! is ignored; the check happens on the first poll, before any collaborator
//! is awaited.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::classify::{classify_error, classify_status, Verdict};
use crate::models::{ConfirmationStatus, Connection, PublicKey, SaleState};
use crate::phase::{step, MintEvent, MintPhase, Outcome};
use crate::services::{
    ConfirmationPoller, IdentityGate, MintSubmitter, NotificationSink, Reloader, WalletProvider,
};

/// Collaborators used by every attempt.
#[derive(Clone)]
pub struct MintServices {
    pub submitter: Rc<dyn MintSubmitter>,
    pub poller: Rc<dyn ConfirmationPoller>,
    pub sink: Rc<dyn NotificationSink>,
    pub gate: Rc<dyn IdentityGate>,
    pub reloader: Rc<dyn Reloader>,
}

/// Why a trigger did not start an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    WalletDisconnected,
    NoPublicKey,
    SaleStateMissing,
}

/// What a call to [`MintController::mint`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintReport {
    /// Another attempt is in flight; nothing happened.
    Busy,
    /// Preconditions not met; nothing happened.
    Skipped(SkipReason),
    /// The attempt ran to completion and one notification was shown.
    Settled {
        attempt: u64,
        outcome: Outcome,
        verdict: Verdict,
    },
}

pub struct MintController {
    services: MintServices,
    connection: Connection,
    tx_timeout: Duration,
    phase: RefCell<MintPhase>,
    attempts: Cell<u64>,
    observer: Option<PhaseObserver>,
}

/// Called with the new phase after every accepted transition.
pub type PhaseObserver = Rc<dyn Fn(&MintPhase)>;

/// Returns the controller to `Idle` when the attempt ends, however it ends.
struct AttemptGuard<'a> {
    controller: &'a MintController,
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        self.controller.advance(MintEvent::Reset);
    }
}

impl MintController {
    pub fn new(services: MintServices, connection: Connection, tx_timeout: Duration) -> Self {
        Self {
            services,
            connection,
            tx_timeout,
            phase: RefCell::new(MintPhase::Idle),
            attempts: Cell::new(0),
            observer: None,
        }
    }

    /// Report every phase change, e.g. to mirror it into UI state.
    pub fn with_phase_observer(mut self, observer: PhaseObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn phase(&self) -> MintPhase {
        self.phase.borrow().clone()
    }

    pub fn is_minting(&self) -> bool {
        self.phase.borrow().is_minting()
    }

    /// Number of attempts started so far.
    pub fn attempts(&self) -> u64 {
        self.attempts.get()
    }

    /// Run one mint attempt.
    pub async fn mint(&self, wallet: &dyn WalletProvider, sale_state: Option<&SaleState>) -> MintReport {
        if self.is_minting() {
            log::debug!("Mint already in flight, ignoring trigger");
            return MintReport::Busy;
        }

        let (payer, sale_state) = match Self::preconditions(wallet, sale_state) {
            Ok(ready) => ready,
            Err(reason) => {
                log::debug!("Mint skipped: {:?}", reason);
                return MintReport::Skipped(reason);
            }
        };

        if !self.advance(MintEvent::Trigger) {
            return MintReport::Busy;
        }
        let _guard = AttemptGuard { controller: self };
        let attempt = self.attempts.get() + 1;
        self.attempts.set(attempt);
        log::info!("Mint attempt #{} for {}", attempt, payer);

        if self.services.gate.is_required(sale_state) {
            self.services.gate.request_check(sale_state);
        }

        let (outcome, verdict) = self.run(sale_state, &payer).await;

        log::info!(
            "Mint attempt #{} settled: {:?} - {}",
            attempt,
            outcome,
            verdict.notification.message
        );
        self.services.sink.show(verdict.notification.clone());
        if verdict.reload {
            self.services.reloader.reload();
        }

        MintReport::Settled {
            attempt,
            outcome,
            verdict,
        }
    }

    fn preconditions<'s>(
        wallet: &dyn WalletProvider,
        sale_state: Option<&'s SaleState>,
    ) -> Result<(PublicKey, &'s SaleState), SkipReason> {
        if !wallet.connected() {
            return Err(SkipReason::WalletDisconnected);
        }
        let payer = wallet.public_key().ok_or(SkipReason::NoPublicKey)?;
        let sale_state = sale_state.ok_or(SkipReason::SaleStateMissing)?;
        Ok((payer, sale_state))
    }

    /// Submit, confirm, classify. Leaves the machine in `Settled`.
    async fn run(&self, sale_state: &SaleState, payer: &PublicKey) -> (Outcome, Verdict) {
        let tx_ids = match self.services.submitter.submit(sale_state, payer).await {
            Ok(tx_ids) => tx_ids,
            Err(error) => {
                log::warn!("Mint submission failed: {}", error);
                self.advance(MintEvent::Failed);
                return (Outcome::Failure, classify_error(&error));
            }
        };

        let Some(tx_id) = tx_ids.into_iter().next() else {
            log::warn!("Submitter returned no transaction");
            self.advance(MintEvent::Failed);
            return (Outcome::Failure, classify_status(&ConfirmationStatus::failed()));
        };

        log::info!("Submitted mint transaction {}", tx_id);
        self.advance(MintEvent::Submitted(tx_id.clone()));

        match self
            .services
            .poller
            .await_confirmation(&tx_id, self.tx_timeout, &self.connection, true)
            .await
        {
            Ok(status) => {
                let outcome = if status.is_success() {
                    Outcome::Success
                } else {
                    Outcome::Failure
                };
                self.advance(MintEvent::Resolved(outcome));
                (outcome, classify_status(&status))
            }
            Err(error) => {
                log::warn!("Confirmation of {} failed: {}", tx_id, error);
                self.advance(MintEvent::Failed);
                (Outcome::Failure, classify_error(&error))
            }
        }
    }

    /// Apply an event; returns false when the transition was rejected.
    fn advance(&self, event: MintEvent) -> bool {
        let next = match step(&self.phase.borrow(), event) {
            Ok(next) => next,
            Err(e) => {
                log::error!("{}", e);
                return false;
            }
        };
        *self.phase.borrow_mut() = next.clone();

        if let Some(ref observer) = self.observer {
            observer(&next);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{
        MSG_CONFIRM_FAILED, MSG_INSUFFICIENT_FUNDS, MSG_NOT_LIVE, MSG_SOLD_OUT, MSG_SUCCESS, MSG_TIMEOUT,
    };
    use crate::error::MintError;
    use crate::models::{Gatekeeper, Notification, Severity, StatusError, TxId};
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::FutureExt;
    use std::panic::AssertUnwindSafe;

    // -------------------------------------------------------------------------
    // Fakes
    // -------------------------------------------------------------------------

    struct FakeWallet {
        connected: bool,
        key: Option<PublicKey>,
    }

    impl FakeWallet {
        fn ready() -> Self {
            Self {
                connected: true,
                key: Some(PublicKey::new("payer111")),
            }
        }
    }

    impl WalletProvider for FakeWallet {
        fn connected(&self) -> bool {
            self.connected
        }
        fn public_key(&self) -> Option<PublicKey> {
            self.key.clone()
        }
        fn can_sign_transaction(&self) -> bool {
            true
        }
        fn can_sign_all_transactions(&self) -> bool {
            true
        }
    }

    #[derive(Default)]
    struct FakeSubmitter {
        result: RefCell<Option<Result<Vec<TxId>, MintError>>>,
        hold: RefCell<Option<oneshot::Receiver<()>>>,
        panic: bool,
        calls: Cell<usize>,
    }

    impl FakeSubmitter {
        fn returning(result: Result<Vec<TxId>, MintError>) -> Self {
            Self {
                result: RefCell::new(Some(result)),
                ..Self::default()
            }
        }
    }

    #[async_trait(?Send)]
    impl MintSubmitter for FakeSubmitter {
        async fn submit(&self, _sale_state: &SaleState, _payer: &PublicKey) -> Result<Vec<TxId>, MintError> {
            self.calls.set(self.calls.get() + 1);
            let hold = self.hold.borrow_mut().take();
            if let Some(rx) = hold {
                let _ = rx.await;
            }
            if self.panic {
                panic!("wallet adapter blew up");
            }
            self.result
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Ok(vec![TxId::new("sig")]))
        }
    }

    #[derive(Default)]
    struct FakePoller {
        result: RefCell<Option<Result<ConfirmationStatus, MintError>>>,
        calls: Cell<usize>,
        last_timeout: Cell<Option<Duration>>,
    }

    impl FakePoller {
        fn returning(result: Result<ConfirmationStatus, MintError>) -> Self {
            Self {
                result: RefCell::new(Some(result)),
                ..Self::default()
            }
        }
    }

    #[async_trait(?Send)]
    impl ConfirmationPoller for FakePoller {
        async fn await_confirmation(
            &self,
            _tx_id: &TxId,
            timeout: Duration,
            _connection: &Connection,
            query_status: bool,
        ) -> Result<ConfirmationStatus, MintError> {
            assert!(query_status);
            self.calls.set(self.calls.get() + 1);
            self.last_timeout.set(Some(timeout));
            self.result
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Ok(ConfirmationStatus::ok()))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        shown: RefCell<Vec<Notification>>,
    }

    impl NotificationSink for RecordingSink {
        fn show(&self, notification: Notification) {
            self.shown.borrow_mut().push(notification);
        }
        fn dismiss(&self) {}
    }

    #[derive(Default)]
    struct RecordingGate {
        checks: Cell<usize>,
    }

    impl IdentityGate for RecordingGate {
        fn request_check(&self, _sale_state: &SaleState) {
            self.checks.set(self.checks.get() + 1);
        }
    }

    #[derive(Default)]
    struct RecordingReloader {
        reloads: Cell<usize>,
    }

    impl Reloader for RecordingReloader {
        fn reload(&self) {
            self.reloads.set(self.reloads.get() + 1);
        }
    }

    struct Harness {
        submitter: Rc<FakeSubmitter>,
        poller: Rc<FakePoller>,
        sink: Rc<RecordingSink>,
        gate: Rc<RecordingGate>,
        reloader: Rc<RecordingReloader>,
        controller: MintController,
    }

    impl Harness {
        fn new(submitter: FakeSubmitter, poller: FakePoller) -> Self {
            let submitter = Rc::new(submitter);
            let poller = Rc::new(poller);
            let sink = Rc::new(RecordingSink::default());
            let gate = Rc::new(RecordingGate::default());
            let reloader = Rc::new(RecordingReloader::default());
            let services = MintServices {
                submitter: submitter.clone(),
                poller: poller.clone(),
                sink: sink.clone(),
                gate: gate.clone(),
                reloader: reloader.clone(),
            };
            let controller = MintController::new(
                services,
                Connection::new("http://localhost:8899"),
                Duration::from_millis(30_000),
            );
            Self {
                submitter,
                poller,
                sink,
                gate,
                reloader,
                controller,
            }
        }

        fn shown(&self) -> Vec<Notification> {
            self.sink.shown.borrow().clone()
        }
    }

    fn sale_state() -> SaleState {
        SaleState {
            candy_machine_id: PublicKey::new("candy111"),
            program_id: PublicKey::new("cndy3Z4yapfJBmL3ShUp5exZKqR3z33thTzeNMm2gRZ"),
            is_active: true,
            is_sold_out: false,
            is_presale: false,
            items_available: 100,
            items_redeemed: 10,
            items_remaining: 90,
            price: 1_000_000_000,
            token_mint: None,
            treasury: PublicKey::new("treasury111"),
            go_live_date: Some(0),
            gatekeeper: None,
            end_settings: None,
        }
    }

    // -------------------------------------------------------------------------
    // Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_successful_mint() {
        let h = Harness::new(FakeSubmitter::default(), FakePoller::default());
        let report = block_on(h.controller.mint(&FakeWallet::ready(), Some(&sale_state())));

        match report {
            MintReport::Settled { attempt, outcome, verdict } => {
                assert_eq!(attempt, 1);
                assert_eq!(outcome, Outcome::Success);
                assert_eq!(verdict.notification.message, MSG_SUCCESS);
            }
            other => panic!("unexpected report: {:?}", other),
        }
        assert_eq!(h.shown(), vec![Notification::success(MSG_SUCCESS)]);
        assert_eq!(h.poller.last_timeout.get(), Some(Duration::from_millis(30_000)));
        assert!(!h.controller.is_minting());
        assert_eq!(h.controller.phase(), MintPhase::Idle);
    }

    #[test]
    fn test_phase_observer_sees_every_transition() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let record = seen.clone();
        let mut h = Harness::new(FakeSubmitter::default(), FakePoller::default());
        h.controller = h
            .controller
            .with_phase_observer(Rc::new(move |phase: &MintPhase| record.borrow_mut().push(phase.clone())));

        block_on(h.controller.mint(&FakeWallet::ready(), Some(&sale_state())));

        assert_eq!(
            *seen.borrow(),
            vec![
                MintPhase::Submitting,
                MintPhase::Confirming { tx_id: TxId::new("sig") },
                MintPhase::Settled { outcome: Outcome::Success },
                MintPhase::Idle,
            ]
        );
    }

    #[test]
    fn test_phase_observer_quiet_when_skipped() {
        let seen = Rc::new(Cell::new(0));
        let count = seen.clone();
        let mut h = Harness::new(FakeSubmitter::default(), FakePoller::default());
        h.controller = h
            .controller
            .with_phase_observer(Rc::new(move |_: &MintPhase| count.set(count.get() + 1)));

        let report = block_on(h.controller.mint(&FakeWallet::ready(), None));

        assert_eq!(report, MintReport::Skipped(SkipReason::SaleStateMissing));
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn test_poller_failure_status() {
        let poller = FakePoller::returning(Ok(ConfirmationStatus {
            err: Some(StatusError::Flag(true)),
        }));
        let h = Harness::new(FakeSubmitter::default(), poller);
        let report = block_on(h.controller.mint(&FakeWallet::ready(), Some(&sale_state())));

        assert!(matches!(report, MintReport::Settled { outcome: Outcome::Failure, .. }));
        assert_eq!(h.shown(), vec![Notification::error(MSG_CONFIRM_FAILED)]);
        assert!(!h.controller.is_minting());
    }

    #[test]
    fn test_no_transaction_skips_poller() {
        let h = Harness::new(FakeSubmitter::returning(Ok(vec![])), FakePoller::default());
        block_on(h.controller.mint(&FakeWallet::ready(), Some(&sale_state())));

        assert_eq!(h.poller.calls.get(), 0);
        assert_eq!(h.shown(), vec![Notification::error(MSG_CONFIRM_FAILED)]);
        assert!(!h.controller.is_minting());
    }

    #[test]
    fn test_only_first_transaction_is_confirmed() {
        let submitter = FakeSubmitter::returning(Ok(vec![TxId::new("first"), TxId::new("second")]));
        let h = Harness::new(submitter, FakePoller::default());
        block_on(h.controller.mint(&FakeWallet::ready(), Some(&sale_state())));

        assert_eq!(h.poller.calls.get(), 1);
    }

    #[test]
    fn test_sold_out_submit_error_reloads() {
        let submitter = FakeSubmitter::returning(Err(MintError::program(311, "Candy machine is empty!")));
        let h = Harness::new(submitter, FakePoller::default());
        block_on(h.controller.mint(&FakeWallet::ready(), Some(&sale_state())));

        assert_eq!(h.shown(), vec![Notification::error(MSG_SOLD_OUT)]);
        assert_eq!(h.reloader.reloads.get(), 1);
        assert_eq!(h.poller.calls.get(), 0);
        assert!(!h.controller.is_minting());
    }

    #[test]
    fn test_not_live_does_not_reload() {
        let submitter = FakeSubmitter::returning(Err(MintError::program(312, "Candy machine is not live!")));
        let h = Harness::new(submitter, FakePoller::default());
        block_on(h.controller.mint(&FakeWallet::ready(), Some(&sale_state())));

        assert_eq!(h.shown(), vec![Notification::error(MSG_NOT_LIVE)]);
        assert_eq!(h.reloader.reloads.get(), 0);
    }

    #[test]
    fn test_insufficient_funds_message() {
        let submitter = FakeSubmitter::returning(Err(MintError::message(
            "Transaction simulation failed: custom program error: 0x135",
        )));
        let h = Harness::new(submitter, FakePoller::default());
        block_on(h.controller.mint(&FakeWallet::ready(), Some(&sale_state())));

        assert_eq!(h.shown()[0].message, MSG_INSUFFICIENT_FUNDS);
    }

    #[test]
    fn test_confirmation_timeout() {
        let h = Harness::new(FakeSubmitter::default(), FakePoller::returning(Err(MintError::timeout())));
        let report = block_on(h.controller.mint(&FakeWallet::ready(), Some(&sale_state())));

        assert!(matches!(report, MintReport::Settled { outcome: Outcome::Failure, .. }));
        assert_eq!(h.shown(), vec![Notification::error(MSG_TIMEOUT)]);
        assert_eq!(h.shown()[0].severity, Severity::Error);
    }

    #[test]
    fn test_skipped_when_not_ready() {
        let h = Harness::new(FakeSubmitter::default(), FakePoller::default());

        let disconnected = FakeWallet {
            connected: false,
            key: Some(PublicKey::new("payer111")),
        };
        let report = block_on(h.controller.mint(&disconnected, Some(&sale_state())));
        assert_eq!(report, MintReport::Skipped(SkipReason::WalletDisconnected));

        let keyless = FakeWallet {
            connected: true,
            key: None,
        };
        let report = block_on(h.controller.mint(&keyless, Some(&sale_state())));
        assert_eq!(report, MintReport::Skipped(SkipReason::NoPublicKey));

        let report = block_on(h.controller.mint(&FakeWallet::ready(), None));
        assert_eq!(report, MintReport::Skipped(SkipReason::SaleStateMissing));

        assert_eq!(h.submitter.calls.get(), 0);
        assert!(h.shown().is_empty());
        assert_eq!(h.controller.attempts(), 0);
    }

    #[test]
    fn test_trigger_while_minting_is_ignored() {
        let (release, hold) = oneshot::channel();
        let submitter = FakeSubmitter {
            hold: RefCell::new(Some(hold)),
            ..FakeSubmitter::default()
        };
        let h = Harness::new(submitter, FakePoller::default());
        let wallet = FakeWallet::ready();
        let state = sale_state();

        let mut first = Box::pin(h.controller.mint(&wallet, Some(&state)));
        assert!(first.as_mut().now_or_never().is_none());
        assert!(h.controller.is_minting());
        assert_eq!(h.controller.phase(), MintPhase::Submitting);

        // Resolves on the first poll, before any collaborator is touched.
        let second = h.controller.mint(&wallet, Some(&state)).now_or_never();
        assert_eq!(second, Some(MintReport::Busy));
        assert_eq!(h.submitter.calls.get(), 1);

        release.send(()).unwrap();
        let report = block_on(first);
        assert!(matches!(report, MintReport::Settled { attempt: 1, .. }));
        assert_eq!(h.shown().len(), 1);
        assert!(!h.controller.is_minting());

        // Back to idle: a new attempt is accepted.
        block_on(h.controller.mint(&wallet, Some(&state)));
        assert_eq!(h.controller.attempts(), 2);
        assert_eq!(h.shown().len(), 2);
    }

    #[test]
    fn test_gatekeeper_check_requested() {
        let h = Harness::new(FakeSubmitter::default(), FakePoller::default());
        let mut state = sale_state();
        block_on(h.controller.mint(&FakeWallet::ready(), Some(&state)));
        assert_eq!(h.gate.checks.get(), 0);

        state.gatekeeper = Some(Gatekeeper {
            network: PublicKey::new("ignREusXmGrscGNUesoU9mxfds9AiYTezUKex2PsZV6"),
            expire_on_use: true,
        });
        block_on(h.controller.mint(&FakeWallet::ready(), Some(&state)));
        assert_eq!(h.gate.checks.get(), 1);
    }

    #[test]
    fn test_phase_reset_after_panic() {
        let submitter = FakeSubmitter {
            panic: true,
            ..FakeSubmitter::default()
        };
        let h = Harness::new(submitter, FakePoller::default());
        let wallet = FakeWallet::ready();
        let state = sale_state();

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            block_on(h.controller.mint(&wallet, Some(&state)))
        }));

        assert!(result.is_err());
        assert!(!h.controller.is_minting());
        assert!(h.shown().is_empty());
    }
}
