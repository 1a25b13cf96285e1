//! Patch command implementation

use crate::cli::utils;
use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgMatches};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::CrdUpdate;

pub fn args() -> Vec<Arg> {
    vec![
        Arg::new("config")
            .short('c')
            .long("config")
            .help("Configuration file path")
            .value_name("FILE")
            .value_parser(clap::value_parser!(PathBuf)),
        Arg::new("catalog-variant")
            .long("catalog")
            .help("Snippet catalog variant to apply")
            .value_name("VARIANT")
            .value_parser(PossibleValuesParser::new(utils::variant_names())),
        Arg::new("width")
            .short('w')
            .long("width")
            .help("Maximum rendered line width")
            .value_name("COLUMNS")
            .value_parser(clap::value_parser!(usize)),
        Arg::new("input")
            .short('i')
            .long("input")
            .help("Read the CRD from FILE instead of standard input")
            .value_name("FILE")
            .value_parser(clap::value_parser!(PathBuf)),
        Arg::new("output")
            .short('o')
            .long("output")
            .help("Write the patched CRD to FILE instead of standard output")
            .value_name("FILE")
            .value_parser(clap::value_parser!(PathBuf)),
    ]
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let app = CrdUpdate::new(config)?;
    debug!(
        catalog = %app.catalog().variant(),
        width = app.config().output.width,
        "loaded configuration"
    );

    let (rendered, report) = match matches.get_one::<PathBuf>("input") {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file {:?}", path))?;
            app.patch_reader(BufReader::new(file))?
        }
        None => app.patch_reader(io::stdin().lock())?,
    };
    for version in &report.versions {
        debug!(?version, "version report");
    }

    // The destination is only touched once the whole document rendered
    match matches.get_one::<PathBuf>("output") {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write output file {:?}", path))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
