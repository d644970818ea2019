use crate::commands::display_name;
use anyhow::Result;
use clap::Parser;
use cuekit::Format;
use cuekit::files::{input_format, output_format, read_disc, write_disc};
use log::debug;
use std::path::PathBuf;

/// Converts a disc description between the CUE and TOC formats.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct ConvertCommand {
    /// Format of the input, guessed from its suffix when omitted
    #[arg(long, short = 'i', value_name = "cue|toc")]
    pub input_format: Option<Format>,

    /// Format of the output; defaults to the output suffix, then to the format the input is not in
    #[arg(long, short = 'o', value_name = "cue|toc")]
    pub output_format: Option<Format>,

    /// Input file, `-` or nothing for standard input
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output file, `-` or nothing for standard output
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

pub fn convert(cmd: ConvertCommand) -> Result<()> {
    let input = cmd.input.as_deref();
    let output = cmd.output.as_deref();

    let from = input_format(cmd.input_format, input)?;
    let to = output_format(cmd.output_format, output, from);
    debug!(
        "Converting {} ({from}) to {} ({to})",
        display_name(input),
        display_name(output)
    );

    let cd = read_disc(input, from)?;
    write_disc(&cd, output, to)?;

    Ok(())
}
