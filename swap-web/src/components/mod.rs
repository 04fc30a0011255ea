//! UI Components

pub mod account;
pub mod header;
pub mod notifications;
pub mod swap_box;
pub mod wallet_modal;

pub use account::Account;
pub use header::Header;
pub use notifications::Notifications;
pub use swap_box::SwapBox;
pub use wallet_modal::WalletModal;
