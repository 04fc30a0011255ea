//! Wallet connector capability.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chain::ChainId;
use crate::error::{Error, Result};

/// Supported wallet connection strategies.
///
/// The string form is what gets persisted in local storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectorId {
    MetaMask,
    WalletConnect,
}

impl ConnectorId {
    pub const ALL: [ConnectorId; 2] = [ConnectorId::MetaMask, ConnectorId::WalletConnect];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectorId::MetaMask => "MetaMask",
            ConnectorId::WalletConnect => "WalletConnect",
        }
    }

    pub fn label(&self) -> &'static str {
        self.as_str()
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ConnectorId::MetaMask => "/assets/wallets/metamask.svg",
            ConnectorId::WalletConnect => "/assets/wallets/walletConnectIcon.svg",
        }
    }

    /// Injected connectors need a provider object on the page.
    pub fn is_injected(&self) -> bool {
        matches!(self, ConnectorId::MetaMask)
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectorId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ConnectorId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::UnknownConnector(s.to_string()))
    }
}

/// Identity granted by a successful activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub account: String,
    pub chain_id: ChainId,
}

/// One wallet connection strategy.
///
/// Futures are not `Send`: implementations wrap browser promises.
#[async_trait(?Send)]
pub trait Connector {
    fn id(&self) -> ConnectorId;

    /// Ask the wallet for an account. May open the wallet's dialog and wait
    /// on the user indefinitely.
    async fn activate(&self) -> Result<Activation>;

    /// Whether the wallet already authorized this page, so activation would
    /// not prompt the user.
    async fn is_authorized(&self) -> bool;

    async fn deactivate(&self);

    async fn account(&self) -> Result<Option<String>>;

    async fn chain_id(&self) -> Result<Option<ChainId>>;

    /// Balance of `account` in wei. `None` when the provider cannot tell.
    async fn balance(&self, account: &str) -> Result<Option<u128>>;
}
