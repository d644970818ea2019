use crate::disc::{Cd, Track};
use crate::msf::Msf;
use std::fmt::{Result, Write};

pub fn write_cue(cd: &Cd, out: &mut impl Write) -> Result {
    if let Some(catalog) = cd.catalog() {
        writeln!(out, "CATALOG {catalog}")?;
    }
    for (pti, value) in cd.cdtext().iter() {
        writeln!(out, "{} \"{value}\"", pti.keyword())?;
    }

    let mut current_file = None;
    for track in cd.tracks() {
        if track.filename().is_some() && track.filename() != current_file {
            current_file = track.filename();
            writeln!(
                out,
                "FILE \"{}\" {}",
                track.filename().unwrap_or_default(),
                file_type(track)
            )?;
        }
        write_track(track, out)?;
    }

    Ok(())
}

fn write_track(track: &Track, out: &mut impl Write) -> Result {
    writeln!(
        out,
        "  TRACK {:02} {}",
        track.number(),
        track.mode().cue_keyword()
    )?;

    let flags = track.flags();
    if !flags.is_empty() {
        let names: Vec<&str> = [
            (flags.copy_permitted, "DCP"),
            (flags.four_channel, "4CH"),
            (flags.pre_emphasis, "PRE"),
            (flags.scms, "SCMS"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect();
        writeln!(out, "    FLAGS {}", names.join(" "))?;
    }

    if let Some(isrc) = track.isrc() {
        writeln!(out, "    ISRC {isrc}")?;
    }
    for (pti, value) in track.cdtext().iter() {
        writeln!(out, "    {} \"{value}\"", pti.keyword())?;
    }

    if track.pregap() > 0 {
        writeln!(out, "    PREGAP {}", Msf::from_frames(track.pregap()))?;
    }

    let indices = track.indices();
    for (number, &value) in indices.iter().enumerate() {
        // index 0 is implied when it sits in the silent pregap or at index 1
        if number == 0 && (value < track.pregap() || indices.get(1) == Some(&value)) {
            continue;
        }
        let offset = track.start() + value.saturating_sub(track.pregap());
        writeln!(out, "    INDEX {number:02} {}", Msf::from_frames(offset))?;
    }

    if track.postgap() > 0 {
        writeln!(out, "    POSTGAP {}", Msf::from_frames(track.postgap()))?;
    }

    Ok(())
}

fn file_type(track: &Track) -> &'static str {
    if !track.mode().is_audio() {
        return "BINARY";
    }

    let extension = track
        .filename()
        .and_then(|f| f.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("mp3") => "MP3",
        Some("aif" | "aiff") => "AIFF",
        Some("bin" | "raw") => "BINARY",
        _ => "WAVE",
    }
}
