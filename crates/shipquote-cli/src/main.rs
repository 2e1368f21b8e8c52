//! Shipquote - multi-tier shipping rate quotes
//!
//! Prices a package against every service tier of a catalog and ranks the
//! quotes by total cost.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
