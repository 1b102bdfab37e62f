pub mod args;
pub mod commands;

use clap::Parser;
use colored::*;
use std::io;
use std::process::ExitCode;

use crate::error::GleifError;
use args::{CommonArgs, ReferenceArgs, SearchArgs};

const SEARCH_EXAMPLES: &str = "\
Examples:
  Search for entities with \"Citibank\" in their legal name (default):
    gleif-search \"Citibank\"

  Search across all fields (name, address, etc.):
    gleif-search --fulltext \"Citibank\"

  Search for entities with \"Citibank\" in the United Kingdom:
    gleif-search \"Citibank\" --country GB";

const REFERENCE_EXAMPLES: &str = "\
Examples:
  Fetch all reference data types:
    gleif-reference-data --all

  Fetch only country codes:
    gleif-reference-data countries

  List available data types:
    gleif-reference-data --list";

/// Search the GLEIF API for legal entities
#[derive(Parser, Debug)]
#[command(
    name = "gleif-search",
    about = "Search the GLEIF API for legal entities matching a query string",
    version,
    long_about = None,
    after_help = SEARCH_EXAMPLES
)]
pub struct SearchCli {
    #[command(flatten)]
    pub args: SearchArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Fetch GLEIF reference data
#[derive(Parser, Debug)]
#[command(
    name = "gleif-reference-data",
    about = "Fetch GLEIF API reference data (countries, regions, legal forms, etc.)",
    version,
    long_about = None,
    after_help = REFERENCE_EXAMPLES
)]
pub struct ReferenceCli {
    #[command(flatten)]
    pub args: ReferenceArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl SearchCli {
    /// Run the entity search tool
    pub async fn run() -> ExitCode {
        let cli = Self::parse();
        init_logging(&cli.common);

        let result = commands::search::execute(cli.args, &cli.common, &mut io::stdout()).await;
        finish(result, &cli.common)
    }
}

impl ReferenceCli {
    /// Run the reference data tool
    pub async fn run() -> ExitCode {
        let cli = Self::parse();
        init_logging(&cli.common);

        let result = commands::reference::execute(cli.args, &cli.common, &mut io::stdout()).await;
        finish(result, &cli.common)
    }
}

/// Set up logging on stderr; `RUST_LOG` takes precedence over the flags
fn init_logging(common: &CommonArgs) {
    let default_filter = if common.verbose {
        "debug"
    } else if common.quiet {
        "error"
    } else {
        "warn"
    };

    // Ignore a second initialisation
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

fn finish(result: crate::error::Result<()>, common: &CommonArgs) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, common.verbose);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Print a one-line error, plus a hint when one exists.
/// For a failed `--all` run the message names the types already fetched.
pub fn report_error(error: &GleifError, verbose: bool) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    if verbose {
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = std::error::Error::source(cause);
        }
    }

    if let Some(hint) = error.hint() {
        eprintln!("\n{} {}", "Hint:".yellow(), hint);
    }
}
