//! Matisse Swap - Leptos Frontend

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes, A},
    path,
};
use lib_core::core_config;

use crate::components::{Header, Notifications, WalletModal};
use crate::pages::{PoolPage, SwapPage};
use crate::state::{Toasts, WalletHandle};

#[component]
pub fn App() -> impl IntoView {
    let config = core_config().clone();
    let toasts = Toasts::new(config.toast_ttl_secs);
    let wallet = WalletHandle::new(config, toasts);

    // Silent reconnection of the last selected wallet.
    wallet.restore();

    view! {
        <Router>
            <div class="app-container">
                <Header wallet=wallet/>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=move || view! { <SwapPage wallet=wallet/> }/>
                    <Route path=path!("/pool") view=move || view! { <PoolPage wallet=wallet/> }/>
                </Routes>
                <WalletModal wallet=wallet/>
                <Notifications toasts=toasts/>
            </div>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page">
            <div class="card not-found">
                <h1>"404 - Page Not Found"</h1>
                <p>"The page you're looking for doesn't exist."</p>
                <A href="/">
                    <span class="btn">"Go to Swap"</span>
                </A>
            </div>
        </div>
    }
}
