use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MsfError {
    #[error("Invalid MSF format: {0}")]
    InvalidFormat(String),

    #[error("Seconds out of range in MSF: {0}")]
    SecondsOutOfRange(String),

    #[error("Frames out of range in MSF: {0}")]
    FramesOutOfRange(String),

    #[error("MSF value too large: {0}")]
    Overflow(String),
}

pub type MsfResult<T> = Result<T, MsfError>;
