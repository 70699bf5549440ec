//! UI Components for the mint page.
//!
//! # Layout Components
//! - [`Header`] - Navigation bar with wallet connection
//! - [`Hero`] - Artwork panel
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`MintInfo`] - Remaining supply, price and go-live date
//! - [`MintButton`] - Mint trigger with sale-aware label
//! - [`Alert`] - Snackbar for mint outcomes

mod alert;
mod footer;
mod header;
mod hero;
mod mint_button;
mod mint_info;

pub use alert::*;
pub use footer::*;
pub use header::*;
pub use hero::*;
pub use mint_button::*;
pub use mint_info::*;
