//! Page modules

pub mod pool;
pub mod swap;

pub use pool::PoolPage;
pub use swap::SwapPage;
