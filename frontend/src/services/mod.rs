//! Wallet, chain and page services.
//!
//! Each service plugs a browser capability into a `candy-mint-core` trait:
//!
//! # Services
//!
//! - [`wallet`] - `window.solana` wallet extension
//! - [`candy_machine`] - Mint submission (`MintSubmitter`)
//! - [`sale_state`] - Backend sale state (`ChainStateReader`) and config
//! - [`confirmation`] - Signature status polling (`ConfirmationPoller`)
//! - [`page`] - Snackbar sink, identity gate, reload
//!
//! # JavaScript Bindings
//!
//! Some services use JavaScript bindings located in `src/js/`:
//! - `wallet.js` - Solana wallet provider API
//! - `candy-machine.js` - Candy Machine mint SDK

pub mod candy_machine;
pub mod confirmation;
pub mod page;
pub mod sale_state;
pub mod wallet;

pub use candy_machine::CandyMachineSubmitter;
pub use confirmation::BrowserPoller;
pub use page::{DomIdentityGate, SnackbarSink, WindowReloader};
pub use sale_state::{fetch_config, BackendStateReader};
pub use wallet::SolanaWallet;
