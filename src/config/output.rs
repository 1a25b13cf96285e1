//! Output formatting configuration

use anyhow::{anyhow, Result};
use crd_patch::document::DEFAULT_WIDTH;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Maximum rendered line width
    pub width: usize,
}

impl OutputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(anyhow!("Output width must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
        }
    }
}
