//! Application configuration.
//!
//! Compile-time settings of the mint page. Everything about the drop itself
//! (candy machine, RPC host, timeout) comes from the backend at
//! `/api/config`, see [`crate::services::sale_state::fetch_config`].

/// Backend API base URL.
pub const BACKEND_URL: &str = "http://localhost:3000";

/// Application name.
///
/// Displayed in the page title and wallet connection popups.
pub const APP_NAME: &str = "Solitaires";

/// DAO home page.
pub const DAO_URL: &str = "https://solitaire-dao.in";

pub const DISCORD_URL: &str = "https://discord.gg/4NzpjHfU";

pub const TWITTER_URL: &str = "https://twitter.com/solitairesNFT";

/// Creator credit in the footer.
pub const CREATOR_NAME: &str = "0xNewMoney";

pub const CREATOR_URL: &str = "https://twitter.com/SOLitairesNFT";

/// DOM id of the identity verification trigger.
pub const IDENTITY_ELEMENT_ID: &str = "identity";

pub use candy_mint_core::notification::AUTO_HIDE_MS;
