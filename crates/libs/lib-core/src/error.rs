//! # Centralized Error Handling
//!
//! This module defines the crate-wide error type [`Error`] used by the wallet
//! lifecycle, the selection store and configuration loading. It follows the
//! `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **Activation Errors** - raised by a wallet provider during activation
//!    - [`UserRejected`](Error::UserRejected)
//!    - [`UnsupportedChain`](Error::UnsupportedChain)
//!    - [`NoProvider`](Error::NoProvider)
//!    - [`Provider`](Error::Provider)
//!
//! 2. **Local Errors** - storage and configuration
//!    - [`Storage`](Error::Storage)
//!    - [`UnknownConnector`](Error::UnknownConnector)
//!    - [`Config`](Error::Config)
//!
//! Activation errors are converted into exactly one user-visible notification at
//! the connection boundary using [`Error::title`] and [`Error::user_message`].
//! Local errors are logged and never surfaced as toasts.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{Error, Result};
//! use lib_core::chain::ChainId;
//!
//! fn check(chain: ChainId) -> Result<ChainId> {
//!     if chain.value() == 0 {
//!         return Err(Error::UnsupportedChain(chain));
//!     }
//!     Ok(chain)
//! }
//!
//! assert!(check(ChainId::new(0)).is_err());
//! ```

use thiserror::Error;

use crate::chain::ChainId;
use crate::wallet::ConnectorId;

/// Convenience type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-wide error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The user dismissed or denied the wallet's authorization request.
    #[error("User rejected the request")]
    UserRejected,

    /// The wallet is on a network the app does not support.
    #[error("Unsupported chain id: {0}")]
    UnsupportedChain(ChainId),

    /// No provider is available for the requested connector
    /// (no injected `window.ethereum`, WalletConnect script missing).
    #[error("No provider available for {0}")]
    NoProvider(ConnectorId),

    /// Any other provider failure, carrying the provider's message.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Reading or writing the persisted wallet selection failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A persisted wallet selection did not name a known connector.
    #[error("Unknown connector: {0}")]
    UnknownConnector(String),

    /// Invalid build-time configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Notification title for this error.
    pub fn title(&self) -> &'static str {
        match self {
            Error::UnsupportedChain(_) => "Chain Error",
            Error::UserRejected => "Request Rejected",
            Error::NoProvider(_) => "Wallet Not Found",
            Error::Provider(_) => "Wallet Error",
            Error::Storage(_) | Error::UnknownConnector(_) | Error::Config(_) => "Error",
        }
    }

    /// User-facing message for this error.
    ///
    /// Local errors get a generic message so implementation details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Error::UserRejected => {
                "Please authorize this website to access your Ethereum account.".to_string()
            }
            Error::UnsupportedChain(_) => {
                "Please check if Ethereum main or Ropsten network is chosen.".to_string()
            }
            Error::NoProvider(connector) => format!(
                "{} is not available. Install the wallet or pick another option.",
                connector.label()
            ),
            Error::Provider(msg) => msg.clone(),
            Error::Storage(_) | Error::UnknownConnector(_) | Error::Config(_) => {
                "An internal error occurred".to_string()
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_chain_is_chain_error() {
        let err = Error::UnsupportedChain(ChainId::new(137));
        assert_eq!(err.title(), "Chain Error");
        assert!(err.user_message().contains("Ropsten"));
        assert_eq!(err.to_string(), "Unsupported chain id: 137");
    }

    #[test]
    fn test_local_errors_hide_details() {
        let err = Error::Storage("QuotaExceededError".to_string());
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn test_provider_message_passes_through() {
        let err = Error::Provider("Already processing eth_requestAccounts".to_string());
        assert_eq!(err.user_message(), "Already processing eth_requestAccounts");
    }
}
