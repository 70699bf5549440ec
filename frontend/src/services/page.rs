//! Page-level collaborators: snackbar sink, identity gate and reload.

use candy_mint_core::{AlertState, IdentityGate, Notification, NotificationSink, Reloader, SaleState};
use gloo_timers::callback::Timeout;
use leptos::*;
use wasm_bindgen::JsCast;

use crate::config::{AUTO_HIDE_MS, IDENTITY_ELEMENT_ID};

/// Writes notifications into the snackbar signal and arms its auto-hide.
#[derive(Clone, Copy)]
pub struct SnackbarSink {
    alert: RwSignal<AlertState>,
}

impl SnackbarSink {
    pub fn new(alert: RwSignal<AlertState>) -> Self {
        Self { alert }
    }
}

impl NotificationSink for SnackbarSink {
    fn show(&self, notification: Notification) {
        let alert = self.alert;
        let mut ticket = None;
        alert.update(|state| ticket = Some(state.show(notification)));

        if let Some(ticket) = ticket {
            Timeout::new(AUTO_HIDE_MS as u32, move || {
                alert.update(|state| {
                    state.expire(ticket);
                });
            })
            .forget();
        }
    }

    fn dismiss(&self) {
        self.alert.update(AlertState::dismiss);
    }
}

/// Clicks the identity verification element rendered for gated sales.
pub struct DomIdentityGate;

impl IdentityGate for DomIdentityGate {
    fn request_check(&self, sale_state: &SaleState) {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(IDENTITY_ELEMENT_ID));

        match element.and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok()) {
            Some(element) => {
                log::info!(
                    "🛂 Identity check via {}",
                    sale_state.gatekeeper_network().map(|n| n.short()).unwrap_or_default()
                );
                element.click();
            }
            None => log::debug!("No #{} element on the page", IDENTITY_ELEMENT_ID),
        }
    }
}

/// Full page reload.
pub struct WindowReloader;

impl Reloader for WindowReloader {
    fn reload(&self) {
        log::info!("↻ Reloading page");
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().reload() {
                log::error!("Reload failed: {:?}", e);
            }
        }
    }
}
