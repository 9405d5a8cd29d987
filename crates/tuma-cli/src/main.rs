//! Tuple maker CLI.

use std::io::{self, IsTerminal};

use clap::Parser;
use tuma_cli::cli::Cli;
use tuma_cli::commands::execute;
use tuma_cli::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config(io::stderr().is_terminal())) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    std::process::exit(execute(&cli.command));
}
