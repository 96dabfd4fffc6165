use crate::core::provider::{self, Provider};
use crate::core::quote::DEFAULT_TRANSFER_LIMIT;
use crate::core::ranking::{FilterKey, SortKey};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_transfer_limit() -> f64 {
    DEFAULT_TRANSFER_LIMIT
}

fn default_processing_delay_ms() -> u64 {
    2000
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Largest transfer accepted, in USD
    #[serde(default = "default_transfer_limit")]
    pub transfer_limit: f64,
    #[serde(default)]
    pub default_sort: SortKey,
    #[serde(default)]
    pub default_filter: FilterKey,
    /// Length of the simulated payment processing step
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,
    pub data_path: Option<String>,
    /// Replaces the built-in provider catalog
    #[serde(default)]
    pub providers: Option<Vec<Provider>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            transfer_limit: default_transfer_limit(),
            default_sort: SortKey::default(),
            default_filter: FilterKey::default(),
            processing_delay_ms: default_processing_delay_ms(),
            data_path: None,
            providers: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "remitscout", "remitscout")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("io", "remitscout", "remitscout")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.transfer_limit.is_finite() && self.transfer_limit > 0.0) {
            anyhow::bail!("transfer_limit must be a positive number");
        }
        if let Some(providers) = &self.providers {
            if let Some(id) = provider::find_duplicate_id(providers) {
                anyhow::bail!("Provider id {id} is used more than once");
            }
            for p in providers {
                if !(p.fee.is_finite() && p.fee >= 0.0) {
                    anyhow::bail!("Provider {} has an invalid fee: {}", p.id, p.fee);
                }
                if !(p.exchange_rate.is_finite() && p.exchange_rate > 0.0) {
                    anyhow::bail!(
                        "Provider {} has an invalid exchange rate: {}",
                        p.id,
                        p.exchange_rate
                    );
                }
            }
        }
        Ok(())
    }

    /// The configured providers, or the built-in list.
    pub fn catalog(&self) -> Vec<Provider> {
        self.providers
            .clone()
            .unwrap_or_else(provider::default_providers)
    }
}
