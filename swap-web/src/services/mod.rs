//! Browser services: wallet providers and local storage

pub mod connector;
pub mod storage;

pub use connector::WalletConnector;
pub use storage::LocalStorageStore;
