//! Application constants

/// Element shown by `index.html` until the wasm module mounts.
pub const LOADING_ELEMENT_ID: &str = "leptos-loading";

/// Fractional digits shown for the account balance.
pub const BALANCE_DISPLAY_DECIMALS: usize = 3;

pub const BALANCE_SYMBOL: &str = "ETH";

pub const APP_LOGO: &str = "/assets/logo.svg";
