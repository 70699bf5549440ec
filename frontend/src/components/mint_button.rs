//! Mint button with sale-aware label

use candy_mint_core::SaleState;
use leptos::*;

/// Label for the current sale and mint phase.
pub fn button_label(sale_state: Option<&SaleState>, is_minting: bool) -> &'static str {
    if sale_state.is_some_and(|s| s.is_sold_out) {
        "SOLD OUT"
    } else if is_minting {
        "MINTING…"
    } else if sale_state.is_some_and(|s| s.is_active) {
        "MINT"
    } else {
        "NOT LIVE"
    }
}

/// Disabled while minting or whenever the sale cannot be minted from.
pub fn is_disabled(sale_state: Option<&SaleState>, is_minting: bool) -> bool {
    match sale_state {
        Some(state) => state.is_sold_out || is_minting || !state.is_active,
        None => true,
    }
}

#[component]
pub fn MintButton(
    #[prop(into)] sale_state: Signal<Option<SaleState>>,
    #[prop(into)] is_minting: Signal<bool>,
    on_mint: Callback<()>,
) -> impl IntoView {
    let label = move || sale_state.with(|s| button_label(s.as_ref(), is_minting.get()));
    let disabled = move || sale_state.with(|s| is_disabled(s.as_ref(), is_minting.get()));

    view! {
        <button
            class="mint-button"
            class:minting=move || is_minting.get()
            disabled=disabled
            on:click=move |_| on_mint.call(())
        >
            {label}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candy_mint_core::PublicKey;

    fn state(active: bool, sold_out: bool) -> SaleState {
        SaleState {
            candy_machine_id: PublicKey::new("cm111"),
            program_id: PublicKey::new("cndy3Z4yapfJBmL3ShUp5exZKqR3z33thTzeNMm2gRZ"),
            is_active: active,
            is_sold_out: sold_out,
            is_presale: false,
            items_available: 10,
            items_redeemed: if sold_out { 10 } else { 3 },
            items_remaining: if sold_out { 0 } else { 7 },
            price: 0,
            token_mint: None,
            treasury: PublicKey::new("treasury111"),
            go_live_date: None,
            gatekeeper: None,
            end_settings: None,
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(button_label(Some(&state(false, true)), true), "SOLD OUT");
        assert_eq!(button_label(Some(&state(true, false)), true), "MINTING…");
        assert_eq!(button_label(Some(&state(true, false)), false), "MINT");
        assert_eq!(button_label(Some(&state(false, false)), false), "NOT LIVE");
        assert_eq!(button_label(None, false), "NOT LIVE");
    }

    #[test]
    fn test_disabled() {
        assert!(!is_disabled(Some(&state(true, false)), false));
        assert!(is_disabled(Some(&state(true, false)), true));
        assert!(is_disabled(Some(&state(false, false)), false));
        assert!(is_disabled(Some(&state(true, true)), false));
        assert!(is_disabled(None, false));
    }
}
