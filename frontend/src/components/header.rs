//! Navigation bar with brand, links and wallet connection

use leptos::*;

use crate::config::{APP_NAME, DAO_URL, DISCORD_URL, TWITTER_URL};
use crate::services::wallet::SolanaWallet;
use crate::types::WalletState;

#[component]
pub fn Header(wallet: RwSignal<WalletState>) -> impl IntoView {
    let connected = move || wallet.with(|w| w.connected);

    let on_connect = move |_| {
        if connected() {
            return;
        }
        log::info!("🔑 Attempting to connect wallet...");
        spawn_local(async move {
            match SolanaWallet::connect().await {
                Ok(state) => wallet.set(state),
                Err(e) => log::error!("❌ Wallet connection failed: {}", e),
            }
        });
    };

    let on_disconnect = move |_| {
        spawn_local(async move {
            match SolanaWallet::disconnect().await {
                Ok(()) => wallet.set(WalletState::default()),
                Err(e) => log::error!("❌ Wallet disconnect failed: {}", e),
            }
        });
    };

    view! {
        <header>
            <div class="header-left">
                <a href="#" class="logo">{APP_NAME.to_uppercase()}</a>
            </div>
            <nav class="header-right">
                <a href=DAO_URL class="nav-link">"DAO"</a>
                <a href=DISCORD_URL class="nav-icon" target="_blank">"Discord"</a>
                <a href=TWITTER_URL class="nav-icon" target="_blank">"Twitter"</a>
                <div
                    class="wallet-status"
                    class:connected=connected
                    on:click=on_connect
                    style="cursor: pointer;"
                >
                    <span class="wallet-dot" class:connected=connected></span>
                    <span id="walletText">{move || wallet.with(WalletState::label)}</span>
                </div>
                <Show when=connected fallback=|| ()>
                    <button class="disconnect" on:click=on_disconnect>"Disconnect"</button>
                </Show>
            </nav>
        </header>
    }
}
