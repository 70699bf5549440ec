//! Terminal notification sink used by the CLI.

use candy_mint_core::{AlertState, Notification, NotificationSink};
use std::cell::RefCell;

/// Prints notifications with an emoji prefix and remembers the visible one.
#[derive(Default)]
pub struct ConsoleSink {
    alert: RefCell<AlertState>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notification currently shown, if not dismissed.
    pub fn visible(&self) -> Option<Notification> {
        self.alert.borrow().visible()
    }
}

impl NotificationSink for ConsoleSink {
    fn show(&self, notification: Notification) {
        println!("{} {}", notification.severity.emoji(), notification.message);
        self.alert.borrow_mut().show(notification);
    }

    fn dismiss(&self) {
        self.alert.borrow_mut().dismiss();
    }
}
