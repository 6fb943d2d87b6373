#![deny(missing_docs)]

//! # Schemagen CLI
//!
//! Converts a Trade Me endpoint description (JSON) into OpenAPI 3.1 component
//! schemas, one file per schema.
//!
//! Every flag can also be supplied through its `SCHEMAGEN_*` environment variable.
//! Log verbosity follows `--verbose` / `--quiet`, overridable with `RUST_LOG`.

use clap::Parser;
use std::process::ExitCode;

use crate::error::CliResult;

mod error;
mod generate;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Generate OpenAPI component schemas from Trade Me endpoint descriptions"
)]
struct Cli {
    #[clap(flatten)]
    generate: generate::GenerateArgs,

    /// Log debug diagnostics (enum discovery, name collisions).
    #[clap(long, short, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[clap(long, short)]
    quiet: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("schemagen error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose)?;

    generate::execute(&cli.generate)?;
    log::info!("Schema generation completed successfully.");
    Ok(())
}

fn init_logging(quiet: bool, verbose: bool) -> CliResult<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .try_init()?;
    Ok(())
}
