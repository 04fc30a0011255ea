//! # Wallet Connection Lifecycle
//!
//! - [`connector`]: the [`Connector`] capability and [`ConnectorId`]
//! - [`state`]: [`ConnectionState`] and the [`Session`] seen by the UI
//! - [`manager`]: [`ConnectionManager`], the only owner of state transitions

pub mod connector;
pub mod manager;
pub mod state;

#[cfg(test)]
mod tests;

pub use connector::{Activation, Connector, ConnectorId};
pub use manager::ConnectionManager;
pub use state::{ConnectionState, Session};
