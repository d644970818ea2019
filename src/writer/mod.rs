use crate::disc::Cd;
use crate::parser::Format;
use std::fmt;
use std::io;

pub mod cue;
pub mod toc;

/// Writes a disc in the given text format to any formatting sink.
pub fn write_text(cd: &Cd, format: Format, out: &mut impl fmt::Write) -> fmt::Result {
    match format {
        Format::Cue => cue::write_cue(cd, out),
        Format::Toc => toc::write_toc(cd, out),
    }
}

/// Renders a disc in the given text format.
pub fn to_string(cd: &Cd, format: Format) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_text(cd, format, &mut out)?;
    Ok(out)
}

pub fn write(cd: &Cd, format: Format, mut out: impl io::Write) -> io::Result<()> {
    let text = to_string(cd, format).map_err(io::Error::other)?;
    out.write_all(text.as_bytes())
}
