use crate::commands::breakpoints::BreakpointsCommand;
use crate::commands::convert::ConvertCommand;
use crate::commands::print::PrintCommand;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod breakpoints;
pub mod convert;
pub mod print;

/// CLI for converting, printing and splitting CUE sheets and TOC files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Convert(ConvertCommand),
    Print(PrintCommand),
    Breakpoints(BreakpointsCommand),
}

/// The inputs named on the command line; standard input when there are none.
pub fn inputs(files: &[PathBuf]) -> Vec<Option<&Path>> {
    if files.is_empty() {
        vec![None]
    } else {
        files.iter().map(|f| Some(f.as_path())).collect()
    }
}

pub fn display_name(path: Option<&Path>) -> String {
    path.map_or_else(|| "-".to_string(), |p| p.display().to_string())
}
