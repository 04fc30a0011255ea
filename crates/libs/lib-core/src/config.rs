//! # Application Configuration
//!
//! Configuration is baked in at compile time because the app runs as wasm in a
//! browser, where there is no process environment. Variables are read with
//! `option_env!` and fall back to defaults.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `MATISSE_STORAGE_KEY` | `matisseSwapApp` | local-storage key of the last-used connector |
//! | `MATISSE_SUPPORTED_CHAINS` | `1,3` | comma-separated chain ids |
//! | `MATISSE_INFURA_ID` | unset | Infura project id for WalletConnect |
//! | `MATISSE_TOAST_TTL_SECS` | `5` | notification lifetime |
//!
//! ## Global Config Access
//!
//! ```rust
//! use lib_core::config::{core_config, init_config};
//!
//! init_config().ok();
//! let config = core_config();
//! assert!(!config.storage_key.is_empty());
//! ```

use std::sync::OnceLock;

use crate::chain::ChainId;
use crate::error::{Error, Result};

pub const DEFAULT_STORAGE_KEY: &str = "matisseSwapApp";
pub const DEFAULT_TOAST_TTL_SECS: i64 = 5;
pub const METAMASK_DOWNLOAD_URL: &str = "https://metamask.io/download.html";

/// Placeholder bounds for swap amounts. They have no business meaning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmountBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for AmountBounds {
    fn default() -> Self {
        Self { min: 0.1, max: 100.0 }
    }
}

/// Application configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Local-storage key holding the last successfully activated connector
    pub storage_key: String,

    /// Chains a connection may be on
    pub supported_chains: Vec<ChainId>,

    /// Infura project id passed to the WalletConnect provider
    pub infura_id: Option<String>,

    /// Seconds before a toast is dismissed
    pub toast_ttl_secs: i64,

    pub amount_bounds: AmountBounds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            supported_chains: vec![ChainId::MAINNET, ChainId::ROPSTEN],
            infura_id: None,
            toast_ttl_secs: DEFAULT_TOAST_TTL_SECS,
            amount_bounds: AmountBounds::default(),
        }
    }
}

impl Config {
    /// Load configuration from compile-time environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| {
            let value = match name {
                "MATISSE_STORAGE_KEY" => option_env!("MATISSE_STORAGE_KEY"),
                "MATISSE_SUPPORTED_CHAINS" => option_env!("MATISSE_SUPPORTED_CHAINS"),
                "MATISSE_INFURA_ID" => option_env!("MATISSE_INFURA_ID"),
                "MATISSE_TOAST_TTL_SECS" => option_env!("MATISSE_TOAST_TTL_SECS"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let storage_key = lookup("MATISSE_STORAGE_KEY").unwrap_or(defaults.storage_key);

        let supported_chains = match lookup("MATISSE_SUPPORTED_CHAINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<ChainId>().map_err(|_| {
                        Error::Config(format!("MATISSE_SUPPORTED_CHAINS has an invalid chain id: {}", s))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            None => defaults.supported_chains,
        };

        let infura_id = lookup("MATISSE_INFURA_ID").filter(|s| !s.trim().is_empty());

        let toast_ttl_secs = match lookup("MATISSE_TOAST_TTL_SECS") {
            Some(raw) => raw.trim().parse().map_err(|e| {
                Error::Config(format!("MATISSE_TOAST_TTL_SECS must be a valid number: {}", e))
            })?,
            None => defaults.toast_ttl_secs,
        };

        Ok(Self {
            storage_key,
            supported_chains,
            infura_id,
            toast_ttl_secs,
            amount_bounds: defaults.amount_bounds,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(Error::Config("MATISSE_STORAGE_KEY must not be empty".to_string()));
        }

        if self.supported_chains.is_empty() {
            return Err(Error::Config(
                "MATISSE_SUPPORTED_CHAINS must name at least one chain".to_string(),
            ));
        }

        if self.toast_ttl_secs < 1 || self.toast_ttl_secs > 60 {
            return Err(Error::Config(
                "MATISSE_TOAST_TTL_SECS must be between 1 and 60".to_string(),
            ));
        }

        if self.amount_bounds.min < 0.0 || self.amount_bounds.min > self.amount_bounds.max {
            return Err(Error::Config("amount bounds are inverted".to_string()));
        }

        Ok(())
    }

    pub fn is_supported_chain(&self, chain: ChainId) -> bool {
        self.supported_chains.contains(&chain)
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// # Errors
///
/// Returns an error if a variable is malformed, validation fails, or the
/// config has already been initialized.
pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Config has already been initialized".to_string()))
}

/// Get a reference to the global configuration.
///
/// Falls back to [`Config::default`] when [`init_config()`] has not run.
pub fn core_config() -> &'static Config {
    CONFIG.get_or_init(|| {
        tracing::warn!("core_config() used before init_config(), using defaults");
        Config::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage_key, "matisseSwapApp");
        assert!(config.is_supported_chain(ChainId::MAINNET));
        assert!(config.is_supported_chain(ChainId::ROPSTEN));
        assert!(!config.is_supported_chain(ChainId::new(137)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("MATISSE_SUPPORTED_CHAINS", "1, 0x89"),
            ("MATISSE_INFURA_ID", "abc123"),
            ("MATISSE_TOAST_TTL_SECS", "8"),
        ]))
        .unwrap();
        assert_eq!(config.supported_chains, vec![ChainId::MAINNET, ChainId::new(137)]);
        assert_eq!(config.infura_id.as_deref(), Some("abc123"));
        assert_eq!(config.toast_ttl_secs, 8);
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_lookup(lookup(&[("MATISSE_SUPPORTED_CHAINS", "1,main")])).is_err());
        assert!(Config::from_lookup(lookup(&[("MATISSE_TOAST_TTL_SECS", "soon")])).is_err());

        let config = Config::from_lookup(lookup(&[("MATISSE_SUPPORTED_CHAINS", " ")])).unwrap();
        assert!(config.validate().is_err());

        let config = Config {
            toast_ttl_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_infura_id_is_none() {
        let config = Config::from_lookup(lookup(&[("MATISSE_INFURA_ID", "  ")])).unwrap();
        assert_eq!(config.infura_id, None);
    }
}
