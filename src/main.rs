use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    cli::run(cli::Cli::parse())
}
