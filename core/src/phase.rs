//! Phase machine for a single mint attempt.
//!
//! ```text
//! Idle ──trigger──▶ Submitting ──submitted(tx)──▶ Confirming ──resolved──▶ Settled
//!  ▲                    │                              │                      │
//!  │                    └──failed / no tx──────────────┴──failed──────────────┤
//!  └──────────────────────────────────reset─────────────────────────────────────┘
//! ```
//!
//! [`step`] is the only place phases change. `reset` is accepted from every
//! phase so cleanup can always return the machine to `Idle`.

use crate::error::TransitionError;
use crate::models::TxId;

/// How a settled attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MintPhase {
    #[default]
    Idle,
    Submitting,
    Confirming {
        tx_id: TxId,
    },
    Settled {
        outcome: Outcome,
    },
}

impl MintPhase {
    /// A mint is in flight in every phase but `Idle`.
    pub fn is_minting(&self) -> bool {
        !matches!(self, MintPhase::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            MintPhase::Idle => "idle",
            MintPhase::Submitting => "submitting",
            MintPhase::Confirming { .. } => "confirming",
            MintPhase::Settled { .. } => "settled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintEvent {
    /// User pressed mint.
    Trigger,
    /// Submitter returned a transaction id.
    Submitted(TxId),
    /// Poller or classifier produced a final outcome.
    Resolved(Outcome),
    /// Submit or confirm raised an error, or no transaction came back.
    Failed,
    /// Cleanup.
    Reset,
}

impl MintEvent {
    pub fn name(&self) -> &'static str {
        match self {
            MintEvent::Trigger => "trigger",
            MintEvent::Submitted(_) => "submitted",
            MintEvent::Resolved(_) => "resolved",
            MintEvent::Failed => "failed",
            MintEvent::Reset => "reset",
        }
    }
}

/// Execute a transition: (phase, event) -> next phase.
pub fn step(phase: &MintPhase, event: MintEvent) -> Result<MintPhase, TransitionError> {
    let next = match (phase, event) {
        (_, MintEvent::Reset) => MintPhase::Idle,
        (MintPhase::Idle, MintEvent::Trigger) => MintPhase::Submitting,
        (MintPhase::Submitting, MintEvent::Submitted(tx_id)) => MintPhase::Confirming { tx_id },
        (MintPhase::Submitting, MintEvent::Failed) | (MintPhase::Confirming { .. }, MintEvent::Failed) => {
            MintPhase::Settled {
                outcome: Outcome::Failure,
            }
        }
        (MintPhase::Confirming { .. }, MintEvent::Resolved(outcome)) => MintPhase::Settled { outcome },
        (phase, event) => {
            return Err(TransitionError::NotAllowed {
                phase: phase.name(),
                event: event.name(),
            })
        }
    };
    Ok(next)
}
