//! Candy Machine v2 account layout and sale-state derivation.
//!
//! The account is an Anchor account: an 8 byte discriminator followed by the
//! borsh encoded [`CandyMachineAccount`]. Config lines and the mint bitmask
//! come after it and are never read.

use borsh::{BorshDeserialize, BorshSerialize};
use candy_mint_core::{EndSettingKind, EndSettings, Gatekeeper, PublicKey, SaleState};

use crate::error::{DecodeError, DecodeResult};

/// `sha256("account:CandyMachine")[..8]`
pub const CANDY_MACHINE_DISCRIMINATOR: [u8; 8] = [51, 173, 177, 113, 25, 241, 109, 189];

/// Raw 32 byte account address.
pub type Pubkey = [u8; 32];

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct CandyMachineAccount {
    pub authority: Pubkey,
    pub wallet: Pubkey,
    pub token_mint: Option<Pubkey>,
    pub items_redeemed: u64,
    pub data: CandyMachineData,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct CandyMachineData {
    pub uuid: String,
    pub price: u64,
    pub symbol: String,
    pub seller_fee_basis_points: u16,
    pub max_supply: u64,
    pub is_mutable: bool,
    pub retain_authority: bool,
    pub go_live_date: Option<i64>,
    pub end_settings: Option<RawEndSettings>,
    pub creators: Vec<Creator>,
    pub hidden_settings: Option<HiddenSettings>,
    pub whitelist_mint_settings: Option<WhitelistMintSettings>,
    pub items_available: u64,
    pub gatekeeper: Option<GatekeeperConfig>,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndSettingType {
    Date,
    Amount,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct RawEndSettings {
    pub end_setting_type: EndSettingType,
    pub number: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Creator {
    pub address: Pubkey,
    pub verified: bool,
    /// Percent, not basis points.
    pub share: u8,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct HiddenSettings {
    pub name: String,
    pub uri: String,
    pub hash: [u8; 32],
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhitelistMintMode {
    BurnEveryTime,
    NeverBurn,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct WhitelistMintSettings {
    pub mode: WhitelistMintMode,
    pub mint: Pubkey,
    pub presale: bool,
    pub discount_price: Option<u64>,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct GatekeeperConfig {
    pub gatekeeper_network: Pubkey,
    pub expire_on_use: bool,
}

/// Base58 form of a raw key.
pub fn encode_pubkey(key: &Pubkey) -> PublicKey {
    PublicKey::new(bs58::encode(key).into_string())
}

/// Check that `key` is a base58 encoded 32 byte address.
pub fn parse_pubkey(key: &str) -> DecodeResult<Pubkey> {
    let bytes = bs58::decode(key)
        .into_vec()
        .map_err(|e| DecodeError::Pubkey(format!("{}: {}", key, e)))?;
    <Pubkey>::try_from(bytes.as_slice())
        .map_err(|_| DecodeError::Pubkey(format!("{}: expected 32 bytes, got {}", key, bytes.len())))
}

/// Decode raw account data, ignoring whatever follows the fixed part.
pub fn decode_account(data: &[u8]) -> DecodeResult<CandyMachineAccount> {
    if data.len() < 8 || data[..8] != CANDY_MACHINE_DISCRIMINATOR {
        return Err(DecodeError::Discriminator);
    }
    let mut body = &data[8..];
    Ok(CandyMachineAccount::deserialize(&mut body)?)
}

/// Sale state of `account` at unix time `now`.
pub fn derive_sale_state(
    candy_machine_id: PublicKey,
    program_id: PublicKey,
    account: &CandyMachineAccount,
    now: i64,
) -> SaleState {
    let data = &account.data;
    let redeemed = account.items_redeemed;
    let mut available = data.items_available;
    let mut ended = false;

    let end_settings = data.end_settings.as_ref().map(|end| match end.end_setting_type {
        EndSettingType::Date => {
            ended = now > end.number as i64;
            EndSettings {
                kind: EndSettingKind::Date,
                number: end.number,
            }
        }
        EndSettingType::Amount => {
            available = available.min(end.number);
            EndSettings {
                kind: EndSettingKind::Amount,
                number: end.number,
            }
        }
    });

    let remaining = available.saturating_sub(redeemed);
    let sold_out = remaining == 0;
    let presale = data
        .whitelist_mint_settings
        .as_ref()
        .is_some_and(|w| w.presale);
    let live = data.go_live_date.is_some_and(|date| date <= now);

    SaleState {
        candy_machine_id,
        program_id,
        is_active: !sold_out && !ended && (presale || live),
        is_sold_out: sold_out,
        is_presale: presale,
        items_available: available,
        items_redeemed: redeemed,
        items_remaining: remaining,
        price: data.price,
        token_mint: account.token_mint.as_ref().map(encode_pubkey),
        treasury: encode_pubkey(&account.wallet),
        go_live_date: data.go_live_date,
        gatekeeper: data.gatekeeper.as_ref().map(|g| Gatekeeper {
            network: encode_pubkey(&g.gatekeeper_network),
            expire_on_use: g.expire_on_use,
        }),
        end_settings,
    }
}
