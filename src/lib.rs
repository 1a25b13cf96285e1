//! crd-update library
//!
//! Applies the canonical `adapterOverrides` and `sink` schemas to every version of a
//! Kubernetes CustomResourceDefinition. The schema work lives in the `crd-patch`
//! crate; this crate adds configuration and the command line front end.

pub mod cli;
pub mod config;

pub use config::{CatalogConfig, Config, OutputConfig};
pub use crd_patch::{Catalog, CatalogVariant, PatchError, PatchReport, Patcher};

use anyhow::Result;
use crd_patch::document;
use std::io::Read;
use tracing::info;

/// Main application context: a validated configuration and its loaded catalog
pub struct CrdUpdate {
    config: Config,
    catalog: Catalog,
}

impl CrdUpdate {
    /// Create a new instance with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let catalog = Catalog::load(config.catalog.variant)?;
        Ok(Self { config, catalog })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Read one CRD from `reader`, patch it and render the result.
    ///
    /// Nothing is rendered unless the whole document was patched.
    pub fn patch_reader<R: Read>(&self, reader: R) -> Result<(String, PatchReport)> {
        let mut crd = document::load(reader)?;
        let report = Patcher::new(&self.catalog).patch_in_place(&mut crd)?;
        if !report.changed() {
            info!("no adapterOverrides or sink schema found, document left unchanged");
        }

        let rendered = document::dump_string(&crd, self.config.output.width)?;
        Ok((rendered, report))
    }

    /// In-memory variant of [`CrdUpdate::patch_reader`]
    pub fn patch_str(&self, input: &str) -> Result<String> {
        let (rendered, _) = self.patch_reader(input.as_bytes())?;
        Ok(rendered)
    }
}
