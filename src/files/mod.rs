use crate::disc::Cd;
use crate::error::{CuekitError, CuekitResult};
use crate::parser::{self, Format};
use crate::writer;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// `-` names standard input or output.
pub fn is_stdio(path: &Path) -> bool {
    path == Path::new("-")
}

/// Picks the format of an input: the explicit choice, else the file suffix.
pub fn input_format(explicit: Option<Format>, path: Option<&Path>) -> CuekitResult<Format> {
    if let Some(format) = explicit {
        return Ok(format);
    }

    path.filter(|p| !is_stdio(p))
        .and_then(Format::from_path)
        .ok_or_else(|| {
            CuekitError::UndeterminedFormat(path.map_or_else(|| PathBuf::from("-"), Path::to_path_buf))
        })
}

/// Picks the format of an output: the explicit choice, else the file
/// suffix, else the other format from the input.
pub fn output_format(explicit: Option<Format>, path: Option<&Path>, input: Format) -> Format {
    explicit
        .or_else(|| path.filter(|p| !is_stdio(p)).and_then(Format::from_path))
        .unwrap_or_else(|| input.opposite())
}

/// Parses a disc description from a file, or standard input for `None`/`-`.
pub fn read_disc(path: Option<&Path>, format: Format) -> CuekitResult<Cd> {
    let result = match path.filter(|p| !is_stdio(p)) {
        Some(path) => parser::parse(format, BufReader::new(File::open(path)?)),
        None => parser::parse(format, io::stdin().lock()),
    };

    result.map_err(|source| CuekitError::Parse {
        path: path.map_or_else(|| PathBuf::from("-"), Path::to_path_buf),
        source,
    })
}

/// Writes a disc description to a file, or standard output for `None`/`-`.
pub fn write_disc(cd: &Cd, path: Option<&Path>, format: Format) -> CuekitResult<()> {
    match path.filter(|p| !is_stdio(p)) {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            writer::write(cd, format, &mut out)?;
            out.flush()?;
        }
        None => writer::write(cd, format, io::stdout().lock())?,
    }

    Ok(())
}
