use anyhow::Result;
use clap::Parser;

use polymerge::cli::{Cli, Commands};
use polymerge::commands::{buffer, reduce};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Buffer(args) => buffer::run(&cli, args),
        Commands::Reduce(args) => reduce::run(&cli, args),
    }
}
