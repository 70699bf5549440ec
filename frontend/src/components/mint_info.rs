//! Remaining supply, price and go-live date of the sale

use candy_mint_core::SaleState;
use chrono::{TimeZone, Utc};
use leptos::*;

/// Human readable go-live date, e.g. `Jan 01 2022, 00:00 UTC`.
pub fn go_live_label(go_live_date: Option<i64>) -> Option<String> {
    let date = Utc.timestamp_opt(go_live_date?, 0).single()?;
    Some(date.format("%b %d %Y, %H:%M UTC").to_string())
}

/// Price with its unit: SOL, or raw units of the payment token.
pub fn price_label(state: &SaleState) -> String {
    match state.token_mint {
        Some(ref mint) => format!("{} {}", state.price, mint.short()),
        None => format!("◎ {}", state.price_sol()),
    }
}

#[component]
pub fn MintInfo(#[prop(into)] sale_state: Signal<Option<SaleState>>) -> impl IntoView {
    view! {
        <div class="mint-info">
            {move || match sale_state.get() {
                Some(state) => view! {
                    <div class="mint-info-grid">
                        <div class="mint-info-item">
                            <span class="label">"Remaining"</span>
                            <span class="value">
                                {format!("{} / {}", state.items_remaining, state.items_available)}
                            </span>
                        </div>
                        <div class="mint-info-item">
                            <span class="label">"Price"</span>
                            <span class="value">{price_label(&state)}</span>
                        </div>
                        {go_live_label(state.go_live_date).map(|date| view! {
                            <div class="mint-info-item">
                                <span class="label">"Live"</span>
                                <span class="value">{date}</span>
                            </div>
                        })}
                        {state.is_presale.then(|| view! {
                            <div class="mint-info-item presale">"Presale: whitelist only"</div>
                        })}
                    </div>
                }.into_view(),
                None => view! { <div class="mint-info-loading">"Loading sale…"</div> }.into_view(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candy_mint_core::PublicKey;

    fn state() -> SaleState {
        SaleState {
            candy_machine_id: PublicKey::new("cm111"),
            program_id: PublicKey::new("cndy3Z4yapfJBmL3ShUp5exZKqR3z33thTzeNMm2gRZ"),
            is_active: true,
            is_sold_out: false,
            is_presale: false,
            items_available: 100,
            items_redeemed: 40,
            items_remaining: 60,
            price: 1_250_000_000,
            token_mint: None,
            treasury: PublicKey::new("treasury111"),
            go_live_date: Some(1_640_995_200),
            gatekeeper: None,
            end_settings: None,
        }
    }

    #[test]
    fn test_go_live_label() {
        assert_eq!(
            go_live_label(Some(1_640_995_200)).as_deref(),
            Some("Jan 01 2022, 00:00 UTC")
        );
        assert_eq!(go_live_label(None), None);
    }

    #[test]
    fn test_price_label() {
        assert_eq!(price_label(&state()), "◎ 1.25");

        let mut spl = state();
        spl.price = 5;
        spl.token_mint = Some(PublicKey::new("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"));
        assert_eq!(price_label(&spl), "5 EPjF…Dt1v");
    }
}
