//! Application state

pub mod notifications;
pub mod wallet;

pub use notifications::Toasts;
pub use wallet::WalletHandle;
