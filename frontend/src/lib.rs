//! Candy Mint - Frontend Rust/Leptos Application
//!
//! A WebAssembly mint page for a Candy Machine drop: connect a Solana
//! wallet, see what is left of the sale and mint one token.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (wallet connection)                                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (artwork)                                          │
//! │  ├── Coming Soon panel, or MintInfo + MintButton            │
//! │  └── Alert (snackbar)                                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Wallet snapshot and frontend errors
//! - [`components`] - UI components (Header, MintInfo, MintButton, etc.)
//! - [`services`] - Browser adapters for the `candy-mint-core` traits

use std::rc::Rc;

use candy_mint_core::{
    AlertState, MintConfig, MintController, MintPhase, MintReport, MintServices,
    RefreshKey, RefreshOutcome, SaleState, SaleStateRefresher, WalletProvider,
};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{AppError, AppResult, WalletState};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🍬 Candy Mint - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

/// Wire the browser collaborators into one controller for this drop.
fn build_controller(
    config: &MintConfig,
    alert: RwSignal<AlertState>,
    phase: RwSignal<MintPhase>,
) -> MintController {
    let services = MintServices {
        submitter: Rc::new(CandyMachineSubmitter::new(config.rpc_host.clone())),
        poller: Rc::new(BrowserPoller::new()),
        sink: Rc::new(SnackbarSink::new(alert)),
        gate: Rc::new(DomIdentityGate),
        reloader: Rc::new(WindowReloader),
    };

    MintController::new(services, config.connection(), config.tx_timeout())
        .with_phase_observer(Rc::new(move |next: &MintPhase| phase.set(next.clone())))
}

#[component]
fn MainContent() -> impl IntoView {
    let wallet = create_rw_signal(SolanaWallet::current());
    let sale_state = create_rw_signal(None::<SaleState>);
    let phase = create_rw_signal(MintPhase::Idle);
    let is_minting = Signal::derive(move || phase.with(MintPhase::is_minting));
    let alert = create_rw_signal(AlertState::default());

    let config = create_local_resource(
        || (),
        |_| async move {
            match fetch_config(BACKEND_URL).await {
                Ok(config) => {
                    log::info!(
                        "⚙️ Candy machine {} on {}",
                        config.candy_machine_id.short(),
                        config.network
                    );
                    Some(config)
                }
                Err(e) => {
                    log::error!("❌ Failed to load configuration: {}", e);
                    None
                }
            }
        },
    );

    let refresher = store_value(Rc::new(SaleStateRefresher::new(Rc::new(
        BackendStateReader::new(BACKEND_URL),
    ))));
    let controller = store_value(None::<Rc<MintController>>);

    // One controller per loaded configuration
    create_effect(move |_| {
        if let Some(Some(config)) = config.get() {
            controller.set_value(Some(Rc::new(build_controller(&config, alert, phase))));
        }
    });

    // Re-derive the sale state whenever signer, machine or endpoint change
    create_effect(move |_| {
        let signer = wallet.with(|w| w.signer());
        let config = config.get().flatten();
        let key = RefreshKey::from_inputs(
            signer,
            config.as_ref().map(|c| c.candy_machine_id.clone()),
            config.as_ref().map(MintConfig::connection),
        );

        let refresher = refresher.get_value();
        spawn_local(async move {
            if let RefreshOutcome::Applied(state) = refresher.sync(key).await {
                sale_state.set(Some(state));
            }
        });
    });

    let on_mint = Callback::new(move |_: ()| {
        let Some(controller) = controller.get_value() else {
            log::warn!("Configuration not loaded yet");
            return;
        };

        let refresher = refresher.get_value();
        let snapshot = wallet.get_untracked();
        let state = sale_state.get_untracked();

        spawn_local(async move {
            let report = controller.mint(&snapshot, state.as_ref()).await;
            if let MintReport::Settled { .. } = report {
                if let RefreshOutcome::Applied(state) = refresher.refresh().await {
                    sale_state.set(Some(state));
                }
            }
        });
    });

    view! {
        <Header wallet=wallet/>

        <div class="container">
            <div class="mint-layout">
                <Hero/>

                <section class="mint-panel">
                    <h1 class="mint-title">{APP_NAME}</h1>
                    <Show
                        when=move || wallet.with(|w| w.connected())
                        fallback=|| view! {
                            <div class="coming-soon">
                                <h2>"Coming Soon"</h2>
                                <p>"Connect your wallet to mint."</p>
                            </div>
                        }
                    >
                        <MintInfo sale_state=sale_state/>
                        <MintButton
                            sale_state=sale_state
                            is_minting=is_minting
                            on_mint=on_mint
                        />
                    </Show>
                </section>
            </div>
        </div>

        <Alert alert=alert/>
        <Footer/>
    }
}
