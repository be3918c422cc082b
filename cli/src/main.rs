//! Gantry CLI - fleet console for CI build agents

use clap::Parser;

use gantry_cli::cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
