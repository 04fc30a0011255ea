//! # Swap Form State
//!
//! Transient, in-memory state of the swap form. Nothing here executes or
//! quotes a swap; amounts are only range-checked against placeholder bounds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::AmountBounds;

/// Tokens offered by the selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    Eth,
    Matic,
    Avax,
}

impl Token {
    pub const ALL: [Token; 3] = [Token::Eth, Token::Matic, Token::Avax];

    pub fn symbol(&self) -> &'static str {
        match self {
            Token::Eth => "ETH",
            Token::Matic => "MATIC",
            Token::Avax => "AVAX",
        }
    }

    /// Value used by the `<select>` options.
    pub fn value(&self) -> &'static str {
        match self {
            Token::Eth => "eth",
            Token::Matic => "matic",
            Token::Avax => "avax",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Token::Eth => "/assets/icons/ethereum.svg",
            Token::Matic => "/assets/icons/polygon.svg",
            Token::Avax => "/assets/icons/avalanche.svg",
        }
    }

    /// Inverse of [`Token::value`]. The empty "Select" option maps to `None`.
    pub fn from_value(value: &str) -> Option<Token> {
        Token::ALL.into_iter().find(|t| t.value() == value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SwapTab {
    #[default]
    Swap,
    Pool,
}

/// Placeholder transaction summary shown once both amounts are valid.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDetails {
    pub liquidity_provider_fee: String,
    pub price_impact: String,
    pub allowed_slippage: String,
    pub minimum_received: String,
    pub guaranteed_output: String,
}

const PLACEHOLDER_FEE: &str = "0.0000005 ETH";
const PLACEHOLDER_PRICE_IMPACT: &str = "0.00%";
const PLACEHOLDER_SLIPPAGE: &str = "0.50%";

#[derive(Debug, Clone, PartialEq)]
pub struct SwapForm {
    pub tab: SwapTab,
    pub from_token: Option<Token>,
    pub to_token: Option<Token>,
    pub from_amount: f64,
    pub to_amount: f64,
    /// The last accepted "from" entry was below the minimum.
    pub from_below_minimum: bool,
    pub valid_from: bool,
    pub valid_to: bool,
    bounds: AmountBounds,
}

impl Default for SwapForm {
    fn default() -> Self {
        Self::new(AmountBounds::default())
    }
}

impl SwapForm {
    pub fn new(bounds: AmountBounds) -> Self {
        Self {
            tab: SwapTab::Swap,
            from_token: Some(Token::Eth),
            to_token: None,
            from_amount: 0.0,
            to_amount: 0.0,
            from_below_minimum: false,
            valid_from: false,
            valid_to: false,
            bounds,
        }
    }

    pub fn bounds(&self) -> AmountBounds {
        self.bounds
    }

    pub fn select_from(&mut self, token: Option<Token>) {
        self.from_token = token;
        if token.is_some() && token == self.to_token {
            self.to_token = None;
        }
    }

    /// Picking the same token on both sides clears the "to" side.
    pub fn select_to(&mut self, token: Option<Token>) {
        if token.is_some() && token == self.from_token {
            self.to_token = None;
        } else {
            self.to_token = token;
        }
    }

    pub fn input_from_amount(&mut self, raw: &str) {
        match self.parse_in_range(raw) {
            Some(amount) => {
                self.from_below_minimum = amount < self.bounds.min;
                self.valid_from = !self.from_below_minimum;
                self.from_amount = amount;
            }
            None => self.valid_from = false,
        }
    }

    pub fn input_to_amount(&mut self, raw: &str) {
        match self.parse_in_range(raw) {
            Some(amount) => {
                self.to_amount = amount;
                self.valid_to = true;
            }
            None => self.valid_to = false,
        }
    }

    /// "Max" button: use the upper bound as the from amount.
    pub fn set_max(&mut self) {
        let max = self.bounds.max;
        self.input_from_amount(&max.to_string());
    }

    pub fn can_switch(&self) -> bool {
        self.valid_from && self.valid_to
    }

    /// Swap tokens and amounts between the two sides.
    pub fn switch(&mut self) -> bool {
        if !self.can_switch() {
            return false;
        }
        std::mem::swap(&mut self.from_token, &mut self.to_token);
        std::mem::swap(&mut self.from_amount, &mut self.to_amount);
        true
    }

    /// Summary shown in the side panel, only when both sides are valid.
    pub fn details(&self) -> Option<TransactionDetails> {
        if !self.can_switch() {
            return None;
        }
        let out = self.to_token.map(|t| t.symbol()).unwrap_or("tokens");
        Some(TransactionDetails {
            liquidity_provider_fee: PLACEHOLDER_FEE.to_string(),
            price_impact: PLACEHOLDER_PRICE_IMPACT.to_string(),
            allowed_slippage: PLACEHOLDER_SLIPPAGE.to_string(),
            minimum_received: format!("{:.2} {}", self.to_amount * 0.9998, out),
            guaranteed_output: format!("{:.2} {}", self.to_amount * 0.9995, out),
        })
    }

    fn parse_in_range(&self, raw: &str) -> Option<f64> {
        let raw = raw.trim();
        let amount = if raw.is_empty() { 0.0 } else { raw.parse::<f64>().ok()? };
        (amount.is_finite() && amount >= 0.0 && amount <= self.bounds.max).then_some(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let form = SwapForm::default();
        assert_eq!(form.tab, SwapTab::Swap);
        assert_eq!(form.from_token, Some(Token::Eth));
        assert_eq!(form.to_token, None);
        assert!(!form.can_switch());
        assert!(form.details().is_none());
    }

    #[test]
    fn test_same_token_clears_to() {
        let mut form = SwapForm::default();
        form.select_to(Some(Token::Eth));
        assert_eq!(form.to_token, None);

        form.select_to(Some(Token::Avax));
        assert_eq!(form.to_token, Some(Token::Avax));

        form.select_from(Some(Token::Avax));
        assert_eq!(form.from_token, Some(Token::Avax));
        assert_eq!(form.to_token, None);
    }

    #[test]
    fn test_from_amount_validation() {
        let mut form = SwapForm::default();

        form.input_from_amount("0.05");
        assert!(form.from_below_minimum);
        assert!(!form.valid_from);
        assert_eq!(form.from_amount, 0.05);

        form.input_from_amount("2.5");
        assert!(!form.from_below_minimum);
        assert!(form.valid_from);
        assert_eq!(form.from_amount, 2.5);

        form.input_from_amount("250");
        assert!(!form.valid_from);
        assert_eq!(form.from_amount, 2.5);

        form.input_from_amount("-1");
        assert!(!form.valid_from);

        form.input_from_amount("abc");
        assert!(!form.valid_from);
        assert_eq!(form.from_amount, 2.5);
    }

    #[test]
    fn test_cleared_from_amount_reads_as_zero() {
        let mut form = SwapForm::default();
        form.input_from_amount("2.5");
        assert!(form.valid_from);

        form.input_from_amount("");
        assert_eq!(form.from_amount, 0.0);
        assert!(form.from_below_minimum);
        assert!(!form.valid_from);

        form.input_from_amount("   ");
        assert_eq!(form.from_amount, 0.0);
        assert!(form.from_below_minimum);
    }

    #[test]
    fn test_to_amount_validation() {
        let mut form = SwapForm::default();
        form.input_to_amount("0");
        assert!(form.valid_to);
        form.input_to_amount("100.5");
        assert!(!form.valid_to);
        assert_eq!(form.to_amount, 0.0);
    }

    #[test]
    fn test_set_max() {
        let mut form = SwapForm::default();
        form.input_from_amount("0.01");
        form.set_max();
        assert_eq!(form.from_amount, 100.0);
        assert!(form.valid_from);
        assert!(!form.from_below_minimum);
    }

    #[test]
    fn test_switch_requires_both_sides() {
        let mut form = SwapForm::default();
        form.select_to(Some(Token::Matic));
        form.input_from_amount("3");
        assert!(!form.switch());

        form.input_to_amount("7");
        assert!(form.switch());
        assert_eq!(form.from_token, Some(Token::Matic));
        assert_eq!(form.to_token, Some(Token::Eth));
        assert_eq!(form.from_amount, 7.0);
        assert_eq!(form.to_amount, 3.0);
    }

    #[test]
    fn test_details_placeholder() {
        let mut form = SwapForm::default();
        form.select_to(Some(Token::Avax));
        form.input_from_amount("1");
        form.input_to_amount("100");

        let details = form.details().unwrap();
        assert_eq!(details.allowed_slippage, "0.50%");
        assert_eq!(details.minimum_received, "99.98 AVAX");
        assert_eq!(details.guaranteed_output, "99.95 AVAX");
    }

    #[test]
    fn test_token_values() {
        for token in Token::ALL {
            assert_eq!(Token::from_value(token.value()), Some(token));
        }
        assert_eq!(Token::from_value(""), None);
    }
}
