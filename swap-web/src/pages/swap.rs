//! Swap page

use leptos::prelude::*;
use lib_core::swap::SwapTab;

use crate::components::SwapBox;
use crate::state::WalletHandle;

#[component]
pub fn SwapPage(wallet: WalletHandle) -> impl IntoView {
    view! {
        <main class="page">
            <SwapBox wallet=wallet tab=SwapTab::Swap/>
        </main>
    }
}
