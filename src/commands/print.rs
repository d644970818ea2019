use crate::commands::{display_name, inputs};
use anyhow::Result;
use clap::Parser;
use const_format::concatcp;
use cuekit::files::{input_format, read_disc};
use cuekit::template::{DISC_TEMPLATE, TRACK_TEMPLATE};
use cuekit::{Format, Selection, Templates, render_report};
use log::debug;
use std::io::{self, Write};
use std::path::PathBuf;

const TEMPLATE_HELP: &str = concatcp!(
    "Template expansion\n",
    "Disc:\n",
    "  %A  album arranger\n",
    "  %C  album composer\n",
    "  %G  album genre\n",
    "  %M  album message\n",
    "  %N  number of tracks\n",
    "  %P  album performer (also %R)\n",
    "  %S  album songwriter\n",
    "  %T  album title\n",
    "  %U  album UPC/EAN\n",
    "Track:\n",
    "  %a  track arranger\n",
    "  %c  track composer\n",
    "  %f  track filename\n",
    "  %g  track genre\n",
    "  %i  track ISRC\n",
    "  %m  track message\n",
    "  %n  track number\n",
    "  %p  track performer\n",
    "  %s  track songwriter\n",
    "  %t  track title\n",
    "  %u  track ISRC (CD-TEXT)\n",
    "\n",
    "Conversions take printf flags, width and precision, e.g. %-20t or %02n.\n",
    "Any other %<character> expands to that character; use %% for '%'.\n",
    "\n",
    "Default disc template:\n",
    DISC_TEMPLATE,
    "\n",
    "Default track template:",
    TRACK_TEMPLATE,
);

/// Prints disc and track information through report templates.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
#[command(after_help = TEMPLATE_HELP)]
pub struct PrintCommand {
    /// Format of the inputs, guessed from their suffix when omitted
    #[arg(long, short = 'i', value_name = "cue|toc")]
    pub input_format: Option<Format>,

    /// Only print track N; 0 prints the disc information only
    #[arg(long = "track-number", short = 'n', value_name = "N")]
    pub track_number: Option<usize>,

    /// Disc template
    #[arg(long, short = 'd', value_name = "TEMPLATE", env = "CUEKIT_DISC_TEMPLATE")]
    pub disc_template: Option<String>,

    /// Track template
    #[arg(long, short = 't', value_name = "TEMPLATE", env = "CUEKIT_TRACK_TEMPLATE")]
    pub track_template: Option<String>,

    /// Files to read, standard input when none are given
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl PrintCommand {
    /// Both stock templates unless one is given, in which case the other
    /// one is empty.
    pub fn templates(&self) -> Templates {
        match (&self.disc_template, &self.track_template) {
            (None, None) => Templates::default(),
            (disc, track) => Templates {
                disc: disc.clone().unwrap_or_default(),
                track: track.clone().unwrap_or_default(),
            },
        }
    }

    pub fn selection(&self) -> Selection {
        match self.track_number {
            None => Selection::All,
            Some(0) => Selection::Disc,
            Some(n) => Selection::Track(n),
        }
    }
}

pub fn print(cmd: PrintCommand) -> Result<()> {
    let templates = cmd.templates();
    let selection = cmd.selection();
    let mut stdout = io::stdout().lock();

    for path in inputs(&cmd.files) {
        let format = input_format(cmd.input_format, path)?;
        debug!("Printing {} as {format}", display_name(path));

        let cd = read_disc(path, format)?;
        let report = render_report(&cd, &templates, selection)?;
        stdout.write_all(report.as_bytes())?;
    }

    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> PrintCommand {
        PrintCommand::parse_from(std::iter::once("print").chain(args.iter().copied()))
    }

    #[test]
    fn stock_templates_without_arguments() {
        assert_eq!(command(&[]).templates(), Templates::default());
    }

    #[test]
    fn one_template_blanks_the_other() {
        let templates = command(&["-t", "%n\\n"]).templates();
        assert_eq!(templates.disc, "");
        assert_eq!(templates.track, "%n\\n");
    }

    #[test]
    fn track_number_selects_the_report() {
        assert_eq!(command(&[]).selection(), Selection::All);
        assert_eq!(command(&["-n", "0"]).selection(), Selection::Disc);
        assert_eq!(command(&["-n", "4"]).selection(), Selection::Track(4));
    }

    #[test]
    fn help_lists_default_templates() {
        assert!(TEMPLATE_HELP.contains(DISC_TEMPLATE));
        assert!(TEMPLATE_HELP.ends_with(TRACK_TEMPLATE));
    }
}
