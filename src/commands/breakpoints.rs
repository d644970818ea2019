use crate::commands::{display_name, inputs};
use anyhow::Result;
use clap::Parser;
use cuekit::breakpoints::format_breakpoints;
use cuekit::files::{input_format, read_disc};
use cuekit::{Format, GapMode, breakpoints as compute_breakpoints};
use log::{debug, warn};
use std::io::{self, Write};
use std::path::PathBuf;

/// Prints the points where a single-file disc image splits into tracks.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct BreakpointsCommand {
    /// Format of the inputs, guessed from their suffix when omitted
    #[arg(long, short = 'i', value_name = "cue|toc")]
    pub input_format: Option<Format>,

    /// Split at index 1, leaving pregaps at the end of the previous track (default)
    #[arg(long, conflicts_with_all = ["prepend_gaps", "split_gaps"])]
    pub append_gaps: bool,

    /// Split at index 0, so pregaps start their own track
    #[arg(long, conflicts_with = "split_gaps")]
    pub prepend_gaps: bool,

    /// Split at both index 0 and index 1
    #[arg(long)]
    pub split_gaps: bool,

    /// Files to read, standard input when none are given
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl BreakpointsCommand {
    pub fn gap_mode(&self) -> GapMode {
        if self.prepend_gaps {
            GapMode::Prepend
        } else if self.split_gaps {
            GapMode::Split
        } else {
            GapMode::Append
        }
    }
}

pub fn breakpoints(cmd: BreakpointsCommand) -> Result<()> {
    let mode = cmd.gap_mode();
    let mut stdout = io::stdout().lock();

    for path in inputs(&cmd.files) {
        let format = input_format(cmd.input_format, path)?;
        debug!("Computing {mode:?} breakpoints of {}", display_name(path));

        let cd = read_disc(path, format)?;
        if cd.track_count() < 2 {
            warn!("{} has fewer than two tracks", display_name(path));
        }

        let points = compute_breakpoints(&cd, mode)?;
        stdout.write_all(format_breakpoints(&points).as_bytes())?;
    }

    stdout.flush()?;
    Ok(())
}
