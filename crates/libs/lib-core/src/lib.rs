//! # Core Library
//!
//! Wallet connection lifecycle, swap form rules, notifications and
//! configuration for the swap front-end. Nothing here touches the browser;
//! the web crate supplies connectors, storage and a notifier.

pub mod chain;
pub mod config;
pub mod error;
pub mod notification;
pub mod storage;
pub mod swap;
pub mod utils;
pub mod wallet;

// Re-export commonly used types
pub use chain::ChainId;
pub use config::{core_config, init_config, Config};
pub use error::{Error, Result};
pub use notification::{Notification, NotificationKind, NotificationQueue, Notifier};
pub use storage::SelectionStore;
pub use wallet::{ConnectionManager, ConnectionState, Connector, ConnectorId, Session};
