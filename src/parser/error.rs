use crate::disc::error::ModelError;
use crate::msf::error::MsfError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("line {line}: {source}")]
    InvalidTime { line: usize, source: MsfError },

    #[error("line {line}: invalid number: {value}")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: unterminated quoted string")]
    UnterminatedString { line: usize },

    #[error("line {line}: {keyword} is missing an argument")]
    MissingArgument { line: usize, keyword: String },

    #[error("line {line}: unknown track mode: {mode}")]
    UnknownTrackMode { line: usize, mode: String },

    #[error("line {line}: {keyword} before any TRACK")]
    NoCurrentTrack { line: usize, keyword: String },

    #[error("line {line}: {keyword} is not allowed here")]
    MisplacedKeyword { line: usize, keyword: String },

    #[error("line {line}: index {index} is out of range")]
    IndexOutOfRange { line: usize, index: usize },

    #[error("line {line}: index {index} of track {track} is out of sequence")]
    IndexOutOfSequence {
        line: usize,
        track: usize,
        index: usize,
    },

    #[error("line {line}: time of track {track} goes backwards")]
    TimeOutOfOrder { line: usize, track: usize },

    #[error("line {line}: track {track} has no INDEX 01")]
    MissingIndexOne { line: usize, track: usize },

    #[error("line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: unexpected end of input, expected {expected}")]
    UnexpectedEof { line: usize, expected: &'static str },

    #[error("line {line}: {source}")]
    Model { line: usize, source: ModelError },
}

impl ParseError {
    /// Line the error was found on, if it came from the input text.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::IoError(_) => None,
            ParseError::InvalidTime { line, .. }
            | ParseError::InvalidNumber { line, .. }
            | ParseError::UnterminatedString { line }
            | ParseError::MissingArgument { line, .. }
            | ParseError::UnknownTrackMode { line, .. }
            | ParseError::NoCurrentTrack { line, .. }
            | ParseError::MisplacedKeyword { line, .. }
            | ParseError::IndexOutOfRange { line, .. }
            | ParseError::IndexOutOfSequence { line, .. }
            | ParseError::TimeOutOfOrder { line, .. }
            | ParseError::MissingIndexOne { line, .. }
            | ParseError::UnexpectedToken { line, .. }
            | ParseError::UnexpectedEof { line, .. }
            | ParseError::Model { line, .. } => Some(*line),
        }
    }

    pub(crate) fn model(line: usize) -> impl FnOnce(ModelError) -> ParseError {
        move |source| ParseError::Model { line, source }
    }

    pub(crate) fn time(line: usize) -> impl FnOnce(MsfError) -> ParseError {
        move |source| ParseError::InvalidTime { line, source }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown disc description format: {0} (expected cue or toc)")]
pub struct UnknownFormatError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_line_number() {
        let err = ParseError::MissingIndexOne { line: 12, track: 3 };
        assert_eq!(err.to_string(), "line 12: track 3 has no INDEX 01");
        assert_eq!(err.line(), Some(12));
    }

    #[test]
    fn model_errors_keep_their_message() {
        let err = ParseError::model(4)(ModelError::TrackOutOfSequence {
            expected: 2,
            found: 3,
        });
        assert_eq!(
            err.to_string(),
            "line 4: Track 3 out of sequence, expected track 2"
        );
    }
}
