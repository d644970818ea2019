use crate::disc::ModelError;
use crate::parser::{ParseError, UnknownFormatError};
use crate::template::TemplateError;
use std::path::PathBuf;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CuekitError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    UnknownFormat(#[from] UnknownFormatError),

    #[error("Could not determine the format of {0}, pass it explicitly")]
    UndeterminedFormat(PathBuf),
}

pub type CuekitResult<T> = result::Result<T, CuekitError>;
