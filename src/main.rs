//! crd-update CLI binary

use std::process::ExitCode;

use crd_update::cli::CliApp;

fn main() -> ExitCode {
    // Logs go to stderr: stdout carries the patched document only
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crd_update=warn,crd_patch=warn".into()),
        )
        .init();

    // Parse command line arguments
    let matches = CliApp::app().get_matches();

    match CliApp::run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
