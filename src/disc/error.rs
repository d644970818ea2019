use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Track {number} out of range (disc has {count} tracks)")]
    TrackOutOfRange { number: usize, count: usize },

    #[error("Track {found} out of sequence, expected track {expected}")]
    TrackOutOfSequence { expected: usize, found: usize },

    #[error("Track {track} has no index {index}")]
    MissingIndex { track: usize, index: usize },

    #[error("Index {index} of track {track} is out of order")]
    IndexOutOfOrder { track: usize, index: usize },

    #[error("Track {track} has a negative file offset for index {index}")]
    NegativeOffset { track: usize, index: usize },
}

pub type ModelResult<T> = Result<T, ModelError>;
