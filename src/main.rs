use crate::commands::breakpoints::breakpoints;
use crate::commands::convert::convert;
use crate::commands::print::print;
use crate::commands::{Cli, Commands};
use anyhow::Result;
use clap::Parser;

mod commands;

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .try_init()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(cmd) => convert(cmd)?,
        Commands::Print(cmd) => print(cmd)?,
        Commands::Breakpoints(cmd) => breakpoints(cmd)?,
    }

    Ok(())
}
