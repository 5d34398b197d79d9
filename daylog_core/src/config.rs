//! Configuration file support for daylog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/daylog/config.toml`.

use crate::generate::GeneratorConfig;
use crate::stats::HealthPolicy;
use crate::timezone::ReferenceZone;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub zone: ZoneConfig,

    #[serde(default)]
    pub health: HealthPolicy,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Reference timezone configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ZoneConfig {
    /// IANA name every day key is computed in
    #[serde(default = "default_reference_zone")]
    pub reference: String,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            reference: default_reference_zone(),
        }
    }
}

/// Where merge results are written
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

// Default value functions
fn default_reference_zone() -> String {
    ReferenceZone::DEFAULT_NAME.into()
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("merged.json")
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            path => {
                tracing::debug!("No config file found at {:?}, using defaults", path);
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("daylog").join("config.toml"))
    }

    /// Reject values that would fail later in the pipeline
    pub fn validate(&self) -> Result<()> {
        self.reference_zone()?;
        if self.health.min_sleep_hours < 0.0 || self.health.short_sleep_hours < 0.0 {
            return Err(Error::Config("Sleep thresholds must not be negative".into()));
        }
        if self.generator.end < self.generator.start {
            return Err(Error::Config(format!(
                "generator.end ({}) is before generator.start ({})",
                self.generator.end, self.generator.start
            )));
        }
        Ok(())
    }

    pub fn reference_zone(&self) -> Result<ReferenceZone> {
        ReferenceZone::from_name(&self.zone.reference)
    }
}
