//! forumindex CLI: forum export to search index records.
//!
//! Reads the JSON export produced by the forum collector and writes the
//! records the index loader pushes to the hosted search service.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
