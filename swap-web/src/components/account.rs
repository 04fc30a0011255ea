//! Account widget
//!
//! Hidden until the page-load reconnection has run, and while the connection
//! is in error (the toast carries the message). Clicking the connected
//! account goes through the same connect path as the button, so a wrong
//! network is reported again.

use leptos::prelude::*;
use lib_core::config::METAMASK_DOWNLOAD_URL;
use lib_core::ConnectionState;

use crate::services::connector::{has_injected_provider, is_metamask_installed};
use crate::state::WalletHandle;

/// What the connect button offers when no wallet is connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Onboarding {
    MetaMask,
    OtherInjected,
    Install,
}

impl Onboarding {
    fn detect() -> Self {
        if is_metamask_installed() {
            Onboarding::MetaMask
        } else if has_injected_provider() {
            Onboarding::OtherInjected
        } else {
            Onboarding::Install
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Onboarding::MetaMask => "Connect to MetaMask",
            Onboarding::OtherInjected => "Connect to Wallet",
            Onboarding::Install => "Install Metamask",
        }
    }
}

fn open_download_page() {
    if let Err(e) = gloo_utils::window().open_with_url_and_target(METAMASK_DOWNLOAD_URL, "_blank") {
        log::warn!("Failed to open MetaMask download page: {:?}", e);
    }
}

#[component]
pub fn Account(wallet: WalletHandle) -> impl IntoView {
    let onboarding = Onboarding::detect();

    let on_connect = move |_| match onboarding {
        Onboarding::Install => open_download_page(),
        _ => wallet.on_connect_click(),
    };

    move || {
        if !wallet.eager_tried.get() {
            return ().into_any();
        }

        let state = wallet.state();
        match &state {
            ConnectionState::Connected { .. } => view! {
                <div class="account">
                    <button class="account-button" on:click=move |_| wallet.on_connect_click()>
                        {state.display_name()}
                    </button>
                    <button class="logout-button" on:click=move |_| wallet.disconnect()>
                        "Logout"
                    </button>
                </div>
            }
            .into_any(),
            ConnectionState::Error { .. } => ().into_any(),
            ConnectionState::Connecting { .. } => view! {
                <div class="account">
                    <button class="connect-button" disabled=true>{state.display_name()}</button>
                </div>
            }
            .into_any(),
            ConnectionState::Disconnected => view! {
                <div class="account">
                    <button class="connect-button" on:click=on_connect>
                        {onboarding.label()}
                    </button>
                </div>
            }
            .into_any(),
        }
    }
}
