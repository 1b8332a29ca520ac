//! mets-ingest CLI Binary
//!
//! Command-line interface for normalizing METS packages.

use clap::Parser;
use mets_ingest::logging::init_logging;
use mets_ingest::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let logging = context.logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output.text);
            if output.exit_code != 0 {
                process::exit(output.exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error ({}): {}", e.kind(), e);
            process::exit(1);
        }
    }
}
