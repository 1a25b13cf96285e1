//! Main configuration structure and implementation

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{CatalogConfig, OutputConfig};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Output formatting
    #[serde(default)]
    pub output: OutputConfig,

    /// Snippet catalog selection
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read configuration file {:?}: {}", path, e))?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| anyhow!("Invalid configuration file {:?}: {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != "1.0" {
            return Err(anyhow!(
                "Unsupported configuration version: {}",
                self.version
            ));
        }

        self.output.validate()?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            output: OutputConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}
