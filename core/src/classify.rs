//! Turns the outcome of a mint attempt into the one notification the user sees.
//!
//! Rules are evaluated top to bottom, the first match wins:
//!
//! | Condition                              | Message                                   |
//! |----------------------------------------|-------------------------------------------|
//! | code `311`                             | `SOLD OUT!` (and the page reloads)        |
//! | code `312`                             | `Minting period hasn't started yet.`      |
//! | raw message contains `0x137`           | `SOLD OUT!`                               |
//! | raw message contains `0x135`           | `Insufficient funds to mint. ...`         |
//! | no text at all                         | `Transaction Timeout! Please try again.`  |
//! | explicit program message               | that message                              |
//! | anything else                          | `Minting failed! Please try again!`       |

use crate::error::MintError;
use crate::models::{ConfirmationStatus, Notification};

/// Program error: the candy machine has no items left.
pub const CODE_SOLD_OUT: u32 = 311;

/// Program error: the sale has not gone live.
pub const CODE_NOT_LIVE: u32 = 312;

/// Hex form of [`CODE_SOLD_OUT`] as it appears in raw simulation logs.
pub const MARKER_SOLD_OUT: &str = "0x137";

/// Hex form of the not-enough-SOL program error.
pub const MARKER_INSUFFICIENT_FUNDS: &str = "0x135";

pub const MSG_SUCCESS: &str = "Congratulations! Mint succeeded!";
pub const MSG_CONFIRM_FAILED: &str = "Mint failed! Please try again!";
pub const MSG_SOLD_OUT: &str = "SOLD OUT!";
pub const MSG_NOT_LIVE: &str = "Minting period hasn't started yet.";
pub const MSG_INSUFFICIENT_FUNDS: &str = "Insufficient funds to mint. Please fund your wallet.";
pub const MSG_TIMEOUT: &str = "Transaction Timeout! Please try again.";
pub const MSG_FALLBACK: &str = "Minting failed! Please try again!";

/// Classified outcome of an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub notification: Notification,
    /// The page must reload to resync with the chain.
    pub reload: bool,
}

impl Verdict {
    fn error(message: impl Into<String>) -> Self {
        Self {
            notification: Notification::error(message),
            reload: false,
        }
    }
}

/// Classify a thrown submit or confirm error.
pub fn classify_error(error: &MintError) -> Verdict {
    match error.code {
        Some(CODE_SOLD_OUT) => {
            return Verdict {
                notification: Notification::error(MSG_SOLD_OUT),
                reload: true,
            }
        }
        Some(CODE_NOT_LIVE) => return Verdict::error(MSG_NOT_LIVE),
        _ => {}
    }

    if let Some(message) = error.message.as_deref() {
        // Plain substring match: a marker at position 0 counts.
        if message.contains(MARKER_SOLD_OUT) {
            return Verdict::error(MSG_SOLD_OUT);
        }
        if message.contains(MARKER_INSUFFICIENT_FUNDS) {
            return Verdict::error(MSG_INSUFFICIENT_FUNDS);
        }
    }

    if error.is_silent() {
        return Verdict::error(MSG_TIMEOUT);
    }

    match error.msg.as_deref() {
        Some(msg) if !msg.is_empty() => Verdict::error(msg),
        _ => Verdict::error(MSG_FALLBACK),
    }
}

/// Classify a status the poller resolved with.
pub fn classify_status(status: &ConfirmationStatus) -> Verdict {
    if status.is_success() {
        Verdict {
            notification: Notification::success(MSG_SUCCESS),
            reload: false,
        }
    } else {
        Verdict::error(MSG_CONFIRM_FAILED)
    }
}
