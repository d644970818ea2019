use crate::disc::Cd;
use crate::msf::MsfError;
use crate::parser::cue::CueParser;
pub use crate::parser::error::{ParseError, ParseResult, UnknownFormatError};
use crate::parser::toc::TocParser;
use std::fmt::Display;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

pub mod cue;
pub mod error;
pub mod lexer;
pub mod toc;

/// The two text dialects a disc description can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Cue,
    Toc,
}

impl Format {
    /// Guess from a file suffix (`.cue` / `.toc`, any case).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Format> {
        let extension = path.as_ref().extension()?.to_str()?;
        extension.parse().ok()
    }

    pub fn opposite(&self) -> Format {
        match self {
            Format::Cue => Format::Toc,
            Format::Toc => Format::Cue,
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Cue => f.write_str("cue"),
            Format::Toc => f.write_str("toc"),
        }
    }
}

impl FromStr for Format {
    type Err = UnknownFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cue" => Ok(Format::Cue),
            "toc" => Ok(Format::Toc),
            _ => Err(UnknownFormatError(s.to_string())),
        }
    }
}

/// Reads a whole disc description in the given format. Bytes that are not
/// valid UTF-8 are replaced rather than rejected.
pub fn parse(format: Format, mut reader: impl Read) -> ParseResult<Cd> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    parse_str(format, &String::from_utf8_lossy(&bytes))
}

/// Sum of two frame counts; an overflow is an invalid time on `line`.
pub(crate) fn add_frames(a: u32, b: u32, line: usize) -> ParseResult<u32> {
    a.checked_add(b).ok_or_else(|| ParseError::InvalidTime {
        line,
        source: MsfError::Overflow(format!("{a} + {b} frames")),
    })
}

pub fn parse_str(format: Format, input: &str) -> ParseResult<Cd> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    match format {
        Format::Cue => CueParser::new(input).parse(),
        Format::Toc => TocParser::new(input)?.parse(),
    }
}
