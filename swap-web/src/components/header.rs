//! Header - logo, page links and the account widget

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::Account;
use crate::state::WalletHandle;
use crate::utils::constants::APP_LOGO;

#[component]
pub fn Header(wallet: WalletHandle) -> impl IntoView {
    view! {
        <nav class="header">
            <A href="/" attr:class="nav-link-clean">
                <span class="nav-title">
                    <img src=APP_LOGO alt="Matisse" class="logo"/>
                    <span class="brand">"Matisse"</span>
                </span>
            </A>
            <div class="nav-links">
                <A href="/" attr:class="nav-link">"Swap"</A>
                <A href="/pool" attr:class="nav-link">"Pool"</A>
            </div>
            <Account wallet=wallet/>
        </nav>
    }
}
