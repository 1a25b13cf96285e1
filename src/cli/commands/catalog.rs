//! Catalog command implementation

use crate::cli::utils;
use anyhow::{anyhow, Result};
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgMatches, Command};
use crd_patch::{document, Catalog, CatalogVariant};

pub fn command() -> Command {
    Command::new("catalog")
        .about("Inspect the canonical snippet catalogs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List available catalog variants"))
        .subcommand(
            Command::new("show")
                .about("Print the snippets of a catalog variant")
                .arg(
                    Arg::new("variant")
                        .help("Catalog variant")
                        .value_parser(PossibleValuesParser::new(utils::variant_names()))
                        .default_value(CatalogVariant::default().name()),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .help("Output format")
                        .value_parser(["yaml", "json"])
                        .default_value("yaml"),
                ),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("list", _)) => list(),
        Some(("show", sub_matches)) => show(sub_matches),
        _ => Err(anyhow!("Missing catalog subcommand")),
    }
}

fn list() -> Result<()> {
    println!("Available catalog variants:");
    for variant in CatalogVariant::all() {
        let marker = if *variant == CatalogVariant::default() {
            " (default)"
        } else {
            ""
        };
        println!("  {:<10} {}{}", variant.name(), variant.description(), marker);
    }
    Ok(())
}

fn show(matches: &ArgMatches) -> Result<()> {
    let variant = match matches.get_one::<String>("variant") {
        Some(name) => utils::parse_variant(name)?,
        None => CatalogVariant::default(),
    };
    let catalog = Catalog::load(variant)?;
    let snippets = catalog.to_document();

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => println!("{}", serde_json::to_string_pretty(&snippets)?),
        _ => print!("{}", document::dump_string(&snippets, document::DEFAULT_WIDTH)?),
    }
    Ok(())
}
