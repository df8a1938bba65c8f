//! Sitepack - resource engine for document-to-static-site exports.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use sitepack::cli::{self, Cli};
use sitepack::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    cli::run(&cli)
}
