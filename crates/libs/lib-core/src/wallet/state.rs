//! Connection state.

use crate::chain::ChainId;
use crate::error::Error;
use crate::utils::shorten_hex;
use crate::wallet::ConnectorId;

/// Wallet connection lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting {
        connector: ConnectorId,
    },
    Connected {
        connector: ConnectorId,
        account: String,
        chain_id: ChainId,
    },
    Error {
        connector: ConnectorId,
        error: Error,
    },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, ConnectionState::Connecting { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ConnectionState::Error { .. })
    }

    pub fn account(&self) -> Option<&str> {
        match self {
            ConnectionState::Connected { account, .. } => Some(account),
            _ => None,
        }
    }

    pub fn chain_id(&self) -> Option<ChainId> {
        match self {
            ConnectionState::Connected { chain_id, .. } => Some(*chain_id),
            ConnectionState::Error {
                error: Error::UnsupportedChain(chain_id),
                ..
            } => Some(*chain_id),
            _ => None,
        }
    }

    pub fn connector(&self) -> Option<ConnectorId> {
        match self {
            ConnectionState::Disconnected => None,
            ConnectionState::Connecting { connector }
            | ConnectionState::Connected { connector, .. }
            | ConnectionState::Error { connector, .. } => Some(*connector),
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            ConnectionState::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Short label for the account button.
    pub fn display_name(&self) -> String {
        match self {
            ConnectionState::Connected { account, .. } => shorten_hex(account, 4),
            ConnectionState::Connecting { .. } => "Connecting...".to_string(),
            ConnectionState::Error { .. } => "error".to_string(),
            ConnectionState::Disconnected => "not connected".to_string(),
        }
    }
}

/// Connection state plus the wallet modal flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub connection: ConnectionState,
    pub wallet_modal_open: bool,
}
