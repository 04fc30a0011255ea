//! Utility modules

pub mod constants;
