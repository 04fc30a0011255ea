//! Wallet modal - pick a provider, or inspect and log out of the connected one

use leptos::prelude::*;
use lib_core::chain::{explorer_url, ChainId};
use lib_core::utils::{parse_balance, ETHER_DECIMALS};
use lib_core::ConnectorId;

use crate::services::connector::has_injected_provider;
use crate::state::WalletHandle;
use crate::utils::constants::{BALANCE_DISPLAY_DECIMALS, BALANCE_SYMBOL};

/// Connectors offered while disconnected. MetaMask needs an injected provider.
fn available_connectors() -> Vec<ConnectorId> {
    ConnectorId::ALL
        .into_iter()
        .filter(|id| !id.is_injected() || has_injected_provider())
        .collect()
}

#[component]
pub fn WalletModal(wallet: WalletHandle) -> impl IntoView {
    let close = move |_| wallet.close_modal();

    move || {
        if !wallet.modal_open() {
            return ().into_any();
        }

        let body = match (wallet.account(), wallet.chain_id()) {
            (Some(account), chain) if wallet.is_connected() => {
                view! { <AccountDetails wallet=wallet account=account chain=chain/> }.into_any()
            }
            _ => view! { <ConnectorList wallet=wallet/> }.into_any(),
        };

        view! {
            <div class="modal-backdrop" on:click=close>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <h2>"Wallet"</h2>
                        <button class="modal-close" on:click=close>"×"</button>
                    </div>
                    {body}
                </div>
            </div>
        }
        .into_any()
    }
}

#[component]
fn ConnectorList(wallet: WalletHandle) -> impl IntoView {
    view! {
        <div class="wallet-options">
            {available_connectors()
                .into_iter()
                .map(|id| {
                    view! {
                        <button class="wallet-button" on:click=move |_| wallet.connect(id)>
                            <img src=id.icon() alt=id.label() class="wallet-icon"/>
                            <span class="wallet-label">{id.label()}</span>
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

#[component]
fn AccountDetails(wallet: WalletHandle, account: String, chain: Option<ChainId>) -> impl IntoView {
    let explorer = explorer_url(chain, &account);
    let explorer_label = format!("View on {}", chain.unwrap_or(ChainId::MAINNET).explorer_name());
    let balance = move || {
        let wei = wallet.balance.get().unwrap_or_default();
        format!("{} {}", parse_balance(wei, ETHER_DECIMALS, BALANCE_DISPLAY_DECIMALS), BALANCE_SYMBOL)
    };

    view! {
        <div class="account-details">
            <p class="label">"Connected account"</p>
            <p class="wallet-address">{account}</p>
            <p class="label">"Balance"</p>
            <p class="balance">{balance}</p>
            <a class="explorer-link" href=explorer target="_blank" rel="noopener noreferrer">
                {explorer_label}
            </a>
            <button class="btn logout-button" on:click=move |_| wallet.disconnect()>
                "Logout"
            </button>
        </div>
    }
}
