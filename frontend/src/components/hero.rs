//! Artwork panel beside the mint box

use leptos::*;

use crate::config::APP_NAME;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero paper">
            <img class="hero-image" src="/assets/img/king.png" alt=APP_NAME/>
        </div>
    }
}
