//! # Formatting Utilities
//!
//! Address and balance formatting shared by the account widget and the wallet modal.
//!
//! ```rust
//! use lib_core::utils::{shorten_hex, parse_balance};
//!
//! let account = "0x1234567890abcdef1234567890abcdef12345678";
//! assert_eq!(shorten_hex(account, 4), "0x1234…5678");
//! assert_eq!(parse_balance(1_500_000_000_000_000_000, 18, 3), "1.500");
//! ```

/// Decimals of ether.
pub const ETHER_DECIMALS: u32 = 18;

/// Shorten a `0x`-prefixed hex string to `0x` + first `len` and last `len` digits.
///
/// Strings too short to shorten are returned as-is.
pub fn shorten_hex(hex: &str, len: usize) -> String {
    if !hex.is_ascii() || hex.len() <= 2 + len * 2 {
        return hex.to_string();
    }

    let prefix = &hex[..2 + len];
    let suffix = &hex[hex.len() - len..];
    format!("{}…{}", prefix, suffix)
}

/// Format an integer amount of base units (e.g. wei) with `decimals` and show
/// `display` fractional digits, truncating the rest.
///
/// Works on the decimal digits directly, so any `decimals` is accepted even
/// where `10^decimals` would overflow `u128`.
pub fn parse_balance(value: u128, decimals: u32, display: usize) -> String {
    let decimals = decimals as usize;
    let digits = format!("{:0>width$}", value, width = decimals + 1);
    let (whole, fraction) = digits.split_at(digits.len() - decimals);

    if display == 0 {
        return whole.to_string();
    }

    let shown: String = fraction.chars().chain(std::iter::repeat('0')).take(display).collect();
    format!("{}.{}", whole, shown)
}

/// Parse the `0x` hex quantity returned by `eth_getBalance`.
pub fn parse_hex_quantity(raw: &str) -> Option<u128> {
    let hex = raw.trim().strip_prefix("0x")?;
    if hex.is_empty() {
        return Some(0);
    }
    u128::from_str_radix(hex, 16).ok()
}
