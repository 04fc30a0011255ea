//! # Chains
//!
//! Chain identifiers and block explorer links.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// EIP-155 chain id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(u64);

impl ChainId {
    pub const MAINNET: ChainId = ChainId(1);
    pub const ROPSTEN: ChainId = ChainId(3);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Parse the `0x`-prefixed hex string returned by `eth_chainId`.
    ///
    /// Plain decimal strings are accepted too; some providers send them on `chainChanged`.
    pub fn from_hex(raw: &str) -> Result<Self, Error> {
        let trimmed = raw.trim();
        let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => trimmed.parse::<u64>(),
        };
        parsed
            .map(ChainId)
            .map_err(|_| Error::Provider(format!("Invalid chain id: {}", raw)))
    }

    /// Accept a chain id sent as a JSON number.
    ///
    /// Rejects negative, fractional and non-finite values, and anything past
    /// the largest integer an `f64` holds exactly.
    pub fn from_number(raw: f64) -> Result<Self, Error> {
        const MAX_EXACT: f64 = 9_007_199_254_740_991.0;
        if !raw.is_finite() || raw < 0.0 || raw.fract() != 0.0 || raw > MAX_EXACT {
            return Err(Error::Provider(format!("Invalid chain id: {}", raw)));
        }
        Ok(ChainId(raw as u64))
    }

    /// Block explorer host for this chain.
    pub fn explorer_host(&self) -> &'static str {
        if *self == ChainId::ROPSTEN {
            "ropsten.etherscan.io"
        } else {
            "etherscan.io"
        }
    }

    /// Block explorer display name for this chain.
    pub fn explorer_name(&self) -> &'static str {
        if *self == ChainId::ROPSTEN {
            "Ropsten Etherscan"
        } else {
            "Etherscan"
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChainId::from_hex(s)
    }
}

/// Block explorer URL for an address.
///
/// Unknown or missing chains fall back to mainnet Etherscan.
pub fn explorer_url(chain: Option<ChainId>, address: &str) -> String {
    let host = chain.unwrap_or(ChainId::MAINNET).explorer_host();
    format!("https://{}/address/{}", host, address)
}
