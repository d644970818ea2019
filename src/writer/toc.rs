use crate::disc::{Cd, Cdtext, Pti, Track};
use crate::msf::Msf;
use std::fmt::{Result, Write};

pub fn write_toc(cd: &Cd, out: &mut impl Write) -> Result {
    writeln!(out, "{}", cd.mode().toc_keyword())?;

    if let Some(catalog) = cd.catalog() {
        writeln!(out, "\nCATALOG \"{}\"", escape(catalog))?;
    }

    if !cd.cdtext().is_empty() {
        writeln!(out, "\nCD_TEXT {{")?;
        writeln!(out, "  LANGUAGE_MAP {{\n    0 : EN\n  }}")?;
        write_language(cd.cdtext(), "UPC_EAN", "  ", out)?;
        writeln!(out, "}}")?;
    }

    for track in cd.tracks() {
        write_track(track, out)?;
    }

    Ok(())
}

fn write_track(track: &Track, out: &mut impl Write) -> Result {
    writeln!(out, "\n// Track {}", track.number())?;
    writeln!(out, "TRACK {}", track.mode().toc_keyword())?;

    let flags = track.flags();
    if flags.copy_permitted {
        writeln!(out, "COPY")?;
    }
    if flags.pre_emphasis {
        writeln!(out, "PRE_EMPHASIS")?;
    }
    if flags.four_channel {
        writeln!(out, "FOUR_CHANNEL_AUDIO")?;
    }

    if let Some(isrc) = track.isrc() {
        writeln!(out, "ISRC \"{}\"", escape(isrc))?;
    }

    if !track.cdtext().is_empty() {
        writeln!(out, "CD_TEXT {{")?;
        write_language(track.cdtext(), "ISRC", "  ", out)?;
        writeln!(out, "}}")?;
    }

    let pregap = track.pregap();
    let index0 = track.index(0).unwrap_or(0);
    let index1 = track.index(1).unwrap_or(0);
    let pregap_only = pregap > 0 && index0 == 0 && index1 == pregap;

    if pregap_only {
        writeln!(out, "PREGAP {}", Msf::from_frames(pregap))?;
    } else if pregap > 0 {
        writeln!(out, "SILENCE {}", Msf::from_frames(pregap))?;
    }

    if let Some(filename) = track.filename() {
        let keyword = if track.mode().is_audio() {
            "AUDIOFILE"
        } else {
            "DATAFILE"
        };
        write!(out, "{keyword} \"{}\"", escape(filename))?;
        if track.mode().is_audio() {
            write!(out, " {}", Msf::from_frames(track.start()))?;
        }
        if let Some(length) = track.length() {
            write!(out, " {}", Msf::from_frames(length))?;
        }
        writeln!(out)?;
    }

    if !pregap_only && index1 > 0 {
        writeln!(out, "START {}", Msf::from_frames(index1))?;
    }
    for &value in track.indices().iter().skip(2) {
        writeln!(out, "INDEX {}", Msf::from_frames(value - index1))?;
    }

    if track.postgap() > 0 {
        writeln!(out, "SILENCE {}", Msf::from_frames(track.postgap()))?;
    }

    Ok(())
}

/// Writes a `LANGUAGE 0 { ... }` block. `upc_keyword` is how the UPC/ISRC
/// pack is spelled at this scope.
fn write_language(
    cdtext: &Cdtext,
    upc_keyword: &str,
    indent: &str,
    out: &mut impl Write,
) -> Result {
    writeln!(out, "{indent}LANGUAGE 0 {{")?;
    for (pti, value) in cdtext.iter() {
        let keyword = match pti {
            Pti::UpcIsrc => upc_keyword,
            pti => pti.keyword(),
        };
        writeln!(out, "{indent}  {keyword} \"{}\"", escape(value))?;
    }
    writeln!(out, "{indent}}}")
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::{DiscMode, TrackMode};

    fn render(cd: &Cd) -> String {
        let mut out = String::new();
        write_toc(cd, &mut out).unwrap();
        out
    }

    #[test]
    fn writes_header_and_disc_cdtext() {
        let mut cd = Cd::new();
        cd.set_catalog("0123456789012");
        cd.cdtext_mut().set(Pti::Title, "Say \"Hi\"");
        cd.cdtext_mut().set(Pti::UpcIsrc, "0123456789012");

        assert_eq!(
            render(&cd),
            "CD_DA\n\
             \n\
             CATALOG \"0123456789012\"\n\
             \n\
             CD_TEXT {\n\
             \x20 LANGUAGE_MAP {\n\
             \x20   0 : EN\n\
             \x20 }\n\
             \x20 LANGUAGE 0 {\n\
             \x20   TITLE \"Say \\\"Hi\\\"\"\n\
             \x20   UPC_EAN \"0123456789012\"\n\
             \x20 }\n\
             }\n"
        );
    }

    #[test]
    fn writes_track_timing() {
        let mut cd = Cd::new();
        cd.set_mode(DiscMode::CdDa);
        let track = cd.add_track(1, TrackMode::Audio).unwrap();
        track.set_filename("album.wav");
        track.set_start(13_350);
        track.set_length(4_500);
        track.set_isrc("USABC0400001");
        track.flags_mut().pre_emphasis = true;
        track.cdtext_mut().set(Pti::UpcIsrc, "USABC0400001");
        track.set_index(0, 0).unwrap();
        track.set_index(1, 150).unwrap();
        track.set_index(2, 300).unwrap();

        assert_eq!(
            render(&cd),
            "CD_DA\n\
             \n\
             // Track 1\n\
             TRACK AUDIO\n\
             PRE_EMPHASIS\n\
             ISRC \"USABC0400001\"\n\
             CD_TEXT {\n\
             \x20 LANGUAGE 0 {\n\
             \x20   ISRC \"USABC0400001\"\n\
             \x20 }\n\
             }\n\
             AUDIOFILE \"album.wav\" 02:58:00 01:00:00\n\
             START 00:02:00\n\
             INDEX 00:02:00\n"
        );
    }

    #[test]
    fn pregap_only_track_uses_pregap_statement() {
        let mut cd = Cd::new();
        let track = cd.add_track(1, TrackMode::Audio).unwrap();
        track.set_filename("a.wav");
        track.set_pregap(150);
        track.set_postgap(75);
        track.set_index(0, 0).unwrap();
        track.set_index(1, 150).unwrap();

        let toc = render(&cd);
        assert!(toc.contains("PREGAP 00:02:00\nAUDIOFILE \"a.wav\" 00:00:00\nSILENCE 00:01:00\n"));
        assert!(!toc.contains("START"));
    }
}
