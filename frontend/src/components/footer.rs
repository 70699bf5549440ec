//! Footer component

use leptos::*;

use crate::config::{CREATOR_NAME, CREATOR_URL, DISCORD_URL, TWITTER_URL};

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div class="footer-links">
                <a href=DISCORD_URL class="footer-link" target="_blank">"Discord"</a>
                <a href=TWITTER_URL class="footer-link" target="_blank">"Twitter"</a>
            </div>
            <div class="created-by">
                "Created by "
                <a href=CREATOR_URL target="_blank">{CREATOR_NAME}</a>
                " • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span>
            </div>
        </footer>
    }
}
