use crate::disc::ModelError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Conversion at byte {offset} ends before its field letter")]
    UnterminatedConversion { offset: usize },

    #[error("Width or precision of the conversion at byte {offset} is too large")]
    FieldTooWide { offset: usize },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type TemplateResult<T> = Result<T, TemplateError>;
