//! Snackbar showing the outcome of the last mint

use candy_mint_core::AlertState;
use leptos::*;

#[component]
pub fn Alert(alert: RwSignal<AlertState>) -> impl IntoView {
    move || {
        alert.with(AlertState::visible).map(|notification| view! {
            <div class=format!("snackbar {}", notification.severity.css_class()) role="alert">
                <span class="snackbar-message">{notification.message}</span>
                <button
                    class="snackbar-close"
                    aria-label="Close"
                    on:click=move |_| alert.update(AlertState::dismiss)
                >
                    "×"
                </button>
            </div>
        })
    }
}
