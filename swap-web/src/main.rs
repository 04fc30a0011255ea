//! Matisse Swap browser app
//!
//! Token swap front-end with MetaMask and WalletConnect support. Wallet
//! lifecycle and form rules live in `lib-core`; this crate is the Leptos UI
//! and the browser bindings.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

mod app;
mod components;
mod pages;
mod services;
mod state;
mod utils;

use app::App;
use utils::constants::LOADING_ELEMENT_ID;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Matisse Swap starting...");

    if let Err(e) = lib_core::init_config() {
        log::error!("Invalid configuration, using defaults: {}", e);
    }

    hide_loading_screen();
    leptos::mount::mount_to_body(|| view! { <App/> });
}

/// Hide the loading screen element
fn hide_loading_screen() {
    let Some(element) = gloo_utils::document().get_element_by_id(LOADING_ELEMENT_ID) else {
        log::warn!("Loading element '{}' not found", LOADING_ELEMENT_ID);
        return;
    };

    if let Some(html_element) = element.dyn_ref::<HtmlElement>() {
        if let Err(e) = html_element.class_list().add_1("hidden") {
            log::warn!("Failed to hide loading screen: {:?}", e);
        }
    }
}
