//! CLI configuration loaded from environment variables.
//!
//! Command-line flags override these values in `main`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chainsplit_core::constants::{DEFAULT_STORE_KEY, DEFAULT_TOTAL};

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Directory holding the chain entry.
    pub data_dir: PathBuf,
    /// Storage key; the entry file is `<data_dir>/<store_key>.json`.
    pub store_key: String,
    /// Amount to split.
    pub total: f64,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = lookup("CHAINSPLIT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let store_key =
            lookup("CHAINSPLIT_STORE_KEY").unwrap_or_else(|| DEFAULT_STORE_KEY.to_string());

        let total = match lookup("CHAINSPLIT_TOTAL") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("CHAINSPLIT_TOTAL must be a number, got {raw:?}"))?,
            None => DEFAULT_TOTAL,
        };

        let log_level = lookup("CHAINSPLIT_LOG").unwrap_or_else(|| "warn".to_string());

        Ok(Config {
            data_dir,
            store_key,
            total,
            log_level,
        })
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chainsplit")
}
