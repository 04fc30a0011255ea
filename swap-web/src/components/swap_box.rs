//! Swap box - token selectors, amounts and the transaction summary
//!
//! Form rules live in [`lib_core::swap::SwapForm`]; this component only keeps
//! the raw input text so partially typed numbers are not rewritten.

use leptos::prelude::*;
use lib_core::core_config;
use lib_core::ConnectionState;
use lib_core::swap::{SwapForm, SwapTab, Token, TransactionDetails};

use crate::state::WalletHandle;

#[component]
pub fn SwapBox(wallet: WalletHandle, tab: SwapTab) -> impl IntoView {
    view! {
        <div class="swap-layout">
            <div class="swap-card">
                <div class="tabs">
                    <a href="/" class=tab_class(tab == SwapTab::Swap)>"Swap"</a>
                    <a href="/pool" class=tab_class(tab == SwapTab::Pool)>"Pool"</a>
                </div>
                {match tab {
                    SwapTab::Swap => view! { <SwapPanel wallet=wallet/> }.into_any(),
                    SwapTab::Pool => view! { <PoolPanel wallet=wallet/> }.into_any(),
                }}
            </div>
        </div>
    }
}

fn tab_class(active: bool) -> &'static str {
    if active {
        "tab active"
    } else {
        "tab"
    }
}

/// Prompt shown on the pool tab, or `None` when there is nothing to ask.
fn pool_prompt(state: &ConnectionState) -> Option<String> {
    if let Some(error) = state.error() {
        return Some(format!("{} Try connecting again.", error.user_message()));
    }
    (*state == ConnectionState::Disconnected).then(|| "Connect your wallet to manage liquidity.".to_string())
}

#[component]
fn PoolPanel(wallet: WalletHandle) -> impl IntoView {
    let prompt = move || {
        let state = wallet.state();
        pool_prompt(&state).map(|text| {
            let class = if state.is_error() { "hint error" } else { "hint" };
            view! {
                <p class=class>{text}</p>
                <button class="link-button" on:click=move |_| wallet.on_connect_click()>
                    "Connect your wallet"
                </button>
            }
        })
    };

    view! {
        <div class="pool-panel">
            <p class="subtitle">"Liquidity pools are coming soon."</p>
            {prompt}
        </div>
    }
}

#[component]
fn SwapPanel(wallet: WalletHandle) -> impl IntoView {
    let form = RwSignal::new(SwapForm::new(core_config().amount_bounds));
    let from_text = RwSignal::new(String::new());
    let to_text = RwSignal::new(String::new());

    let disabled = move || !wallet.is_connected();
    let min_amount = form.with_untracked(|f| f.bounds().min);

    let on_from_token = move |ev: web_sys::Event| {
        let token = Token::from_value(&event_target_value(&ev));
        form.update(|f| f.select_from(token));
    };
    let on_to_token = move |ev: web_sys::Event| {
        let token = Token::from_value(&event_target_value(&ev));
        form.update(|f| f.select_to(token));
    };
    let on_from_amount = move |ev| {
        let raw = event_target_value(&ev);
        form.update(|f| f.input_from_amount(&raw));
        from_text.set(raw);
    };
    let on_to_amount = move |ev| {
        let raw = event_target_value(&ev);
        form.update(|f| f.input_to_amount(&raw));
        to_text.set(raw);
    };
    let on_max = move |_| {
        form.update(|f| f.set_max());
        from_text.set(form.with_untracked(|f| f.from_amount.to_string()));
    };
    let on_switch = move |_| {
        let mut switched = false;
        form.update(|f| switched = f.switch());
        if switched {
            let from = from_text.get_untracked();
            from_text.set(to_text.get_untracked());
            to_text.set(from);
        }
    };
    let on_swap = move |_| {
        log::info!("Swap requested; execution is not available");
    };

    view! {
        <div class="swap-panel">
            <div class="swap-form">
                <div class="token-row">
                    <label>"From"</label>
                    <TokenSelect
                        selected=Signal::derive(move || form.with(|f| f.from_token))
                        on_change=on_from_token
                    />
                    <input
                        type="number"
                        class=move || if form.with(|f| f.valid_from) { "amount" } else { "amount invalid" }
                        placeholder="0.0"
                        min="0"
                        disabled=disabled
                        prop:value=move || from_text.get()
                        on:input=on_from_amount
                    />
                    <button class="max-button" disabled=disabled on:click=on_max>"Max"</button>
                </div>
                <Show when=move || form.with(|f| f.from_below_minimum)>
                    <p class="hint error">{format!("Minimum amount is {}", min_amount)}</p>
                </Show>

                <button
                    class="switch-button"
                    disabled=move || !form.with(|f| f.can_switch())
                    on:click=on_switch
                >
                    "⇅"
                </button>

                <div class="token-row">
                    <label>"To"</label>
                    <TokenSelect
                        selected=Signal::derive(move || form.with(|f| f.to_token))
                        on_change=on_to_token
                    />
                    <input
                        type="number"
                        class=move || if form.with(|f| f.valid_to) { "amount" } else { "amount invalid" }
                        placeholder="0.0"
                        min="0"
                        disabled=disabled
                        prop:value=move || to_text.get()
                        on:input=on_to_amount
                    />
                </div>

                <button
                    class="btn swap-button"
                    disabled=move || form.with(|f| f.details().is_none())
                    on:click=on_swap
                >
                    "Swap"
                </button>
            </div>

            <SidePanel wallet=wallet details=Signal::derive(move || form.with(|f| f.details()))/>
        </div>
    }
}

#[component]
fn TokenSelect<F>(selected: Signal<Option<Token>>, on_change: F) -> impl IntoView
where
    F: Fn(web_sys::Event) + 'static,
{
    view! {
        <select
            class="token-select"
            prop:value=move || selected.get().map(|t| t.value()).unwrap_or("")
            on:change=on_change
        >
            <option value="">"Select"</option>
            {Token::ALL
                .into_iter()
                .map(|token| view! { <option value=token.value()>{token.symbol()}</option> })
                .collect::<Vec<_>>()}
        </select>
    }
}

#[component]
fn SidePanel(wallet: WalletHandle, details: Signal<Option<TransactionDetails>>) -> impl IntoView {
    move || {
        if !wallet.is_connected() {
            return view! {
                <div class="side-panel">
                    <p>"Connect your wallet to swap tokens."</p>
                    <button class="link-button" on:click=move |_| wallet.on_connect_click()>
                        "Connect your wallet"
                    </button>
                </div>
            }
            .into_any();
        }

        match details.get() {
            None => view! {
                <div class="side-panel">
                    <p class="hint">"Select both tokens and enter valid amounts to see transaction details."</p>
                </div>
            }
            .into_any(),
            Some(details) => view! {
                <div class="side-panel">
                    <h3>"Transaction details"</h3>
                    <dl class="details">
                        <dt>"Liquidity provider fee"</dt>
                        <dd>{details.liquidity_provider_fee}</dd>
                        <dt>"Price impact"</dt>
                        <dd>{details.price_impact}</dd>
                        <dt>"Allowed slippage"</dt>
                        <dd>{details.allowed_slippage}</dd>
                        <dt>"Minimum received"</dt>
                        <dd>{details.minimum_received}</dd>
                        <dt>"Guaranteed output"</dt>
                        <dd>{details.guaranteed_output}</dd>
                    </dl>
                </div>
            }
            .into_any(),
        }
    }
}
