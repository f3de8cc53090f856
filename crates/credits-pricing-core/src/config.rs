use serde::Deserialize;

use crate::error::{PricingError, Result};
use crate::selection::DEFAULT_MODEL_ID;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

pub const ENV_API_URL: &str = "CREDITS_PRICING_API_URL";
pub const ENV_TOKEN: &str = "CREDITS_PRICING_TOKEN";

/// Settings for reaching the billing API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api_url: String,
    pub token: Option<String>,
    pub default_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            default_model: DEFAULT_MODEL_ID.to_string(),
        }
    }
}

/// Parse config from a TOML string. Absent keys keep their defaults.
pub fn parse_config(toml_str: &str) -> Result<Config> {
    toml::from_str(toml_str).map_err(|e| PricingError::Config(format!("bad config.toml: {e}")))
}

impl Config {
    /// Override fields from an environment lookup. Empty values are ignored.
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = present(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(token) = present(ENV_TOKEN) {
            self.token = Some(token);
        }
        self
    }
}

#[cfg(feature = "network")]
mod fs {
    use std::path::{Path, PathBuf};

    use super::{parse_config, Config};
    use crate::error::{PricingError, Result};

    /// `<config dir>/credits-pricing/config.toml`, if the platform has one.
    pub fn config_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("credits-pricing").join("config.toml"))
    }

    /// Load a config file; a missing file yields defaults.
    pub fn load_config(path: &Path) -> Result<Config> {
        match std::fs::read_to_string(path) {
            Ok(content) => parse_config(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(PricingError::Io(format!("{}: {e}", path.display()))),
        }
    }

    /// Config from the default location, then the process environment.
    pub fn load_config_auto() -> Result<Config> {
        let config = match config_path() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                load_config(&path)?
            }
            None => Config::default(),
        };
        Ok(config.apply_env(|k| std::env::var(k).ok()))
    }
}

#[cfg(feature = "network")]
pub use fs::{config_path, load_config, load_config_auto};
