//! Snackbar state: at most one notification, manual dismiss, timed auto-hide.
//!
//! The host owns the timer. [`AlertState::show`] hands back a ticket; when
//! [`AUTO_HIDE_MS`] has passed the host calls [`AlertState::expire`] with it,
//! which only closes the alert if nothing newer was shown meanwhile.

use std::time::Duration;

use crate::models::{Notification, Severity};

/// Auto-hide delay of the snackbar, in milliseconds.
pub const AUTO_HIDE_MS: u64 = 6000;

pub fn auto_hide_duration() -> Duration {
    Duration::from_millis(AUTO_HIDE_MS)
}

/// Identifies one `show` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlertTicket(u64);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlertState {
    pub open: bool,
    pub message: String,
    pub severity: Option<Severity>,
    shown: u64,
}

impl AlertState {
    /// Replace the pending notification and open the alert.
    pub fn show(&mut self, notification: Notification) -> AlertTicket {
        self.shown += 1;
        self.open = true;
        self.message = notification.message;
        self.severity = Some(notification.severity);
        AlertTicket(self.shown)
    }

    /// Hide the alert. Message and severity stay for the fade-out.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    /// Auto-hide for `ticket`. Returns true if the alert was closed.
    pub fn expire(&mut self, ticket: AlertTicket) -> bool {
        if ticket.0 != self.shown || !self.open {
            return false;
        }
        self.open = false;
        true
    }

    /// The notification currently on screen.
    pub fn visible(&self) -> Option<Notification> {
        if !self.open {
            return None;
        }
        self.severity.map(|severity| Notification {
            message: self.message.clone(),
            severity,
        })
    }
}
