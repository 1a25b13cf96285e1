//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("crd-update")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Patch the adapterOverrides and sink schemas of a CustomResourceDefinition")
            .long_about(
                "Reads one CustomResourceDefinition from standard input, replaces the \
                 adapterOverrides and sink schemas of every version with the canonical \
                 snippets, and writes the result to standard output.",
            )
            .args(commands::patch::args())
            .subcommand(commands::catalog::command())
    }

    /// Run the CLI application
    pub fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("catalog", sub_matches)) => commands::catalog::run(sub_matches),
            // Patching is the default so the tool composes in a pipeline
            _ => commands::patch::run(matches),
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::{anyhow, Result};
    use crd_patch::CatalogVariant;
    use std::path::PathBuf;

    use crate::config::Config;

    /// Load configuration from `--config`, or defaults, then apply flag overrides
    pub fn load_config(matches: &clap::ArgMatches) -> Result<Config> {
        let mut config = match matches.get_one::<PathBuf>("config") {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(width) = matches.get_one::<usize>("width") {
            config.output.width = *width;
        }

        if let Some(variant) = matches.get_one::<String>("catalog-variant") {
            config.catalog.variant = parse_variant(variant)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn parse_variant(name: &str) -> Result<CatalogVariant> {
        name.parse::<CatalogVariant>().map_err(|e| anyhow!(e))
    }

    /// Names accepted by `--catalog`
    pub fn variant_names() -> Vec<&'static str> {
        CatalogVariant::all().iter().map(|v| v.name()).collect()
    }
}
