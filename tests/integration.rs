//! End-to-end behaviour of the library entry points.

use cuekit::breakpoints::format_breakpoints;
use cuekit::files::{input_format, output_format, read_disc, write_disc};
use cuekit::parser::ParseError;
use cuekit::template::TemplateError;
use cuekit::*;
use std::fs;

const TWO_TRACK_CUE: &str = r#"PERFORMER "The Band"
TITLE "First Album"
FILE "album.wav" WAVE
  TRACK 01 AUDIO
    TITLE "Opening"
    INDEX 01 00:00:00
  TRACK 02 AUDIO
    TITLE "Closing"
    INDEX 01 03:00:00
"#;

const SAMPLE_TOC: &str = r#"CD_DA
CATALOG "0724384260924"

CD_TEXT {
  LANGUAGE_MAP {
    0 : EN
  }
  LANGUAGE 0 {
    TITLE "Live \"At\" Home"
    PERFORMER "Band"
    SIZE_INFO { 0, 1, 2 }
  }
}

// Track 1
TRACK AUDIO
NO COPY
NO PRE_EMPHASIS
TWO_CHANNEL_AUDIO
ISRC "GBAYE0000001"
AUDIOFILE "live.wav" 0 04:00:00

// Track 2
TRACK AUDIO
COPY
AUDIOFILE "live.wav" 04:00:00 03:00:00
START 00:01:30
INDEX 01:00:00
"#;

#[test]
fn single_file_disc_has_one_breakpoint() {
    let cd = parse_str(Format::Cue, TWO_TRACK_CUE).unwrap();
    let points = breakpoints(&cd, GapMode::default()).unwrap();

    assert_eq!(format_breakpoints(&points), "3:00.00\n");
}

#[test]
fn tracks_out_of_order_fail_to_parse() {
    let cue = "FILE a.wav WAVE\nTRACK 1 AUDIO\nINDEX 01 00:00:00\nTRACK 3 AUDIO\nINDEX 01 01:00:00\n";
    let err = parse_str(Format::Cue, cue).unwrap_err();

    assert!(matches!(err, ParseError::Model { line: 4, .. }));
}

#[test]
fn toc_sample_parses() {
    let cd = parse_str(Format::Toc, SAMPLE_TOC).unwrap();

    assert_eq!(cd.mode(), DiscMode::CdDa);
    assert_eq!(cd.catalog(), Some("0724384260924"));
    assert_eq!(cd.cdtext().get(Pti::Title), Some("Live \"At\" Home"));
    assert_eq!(cd.track_count(), 2);

    let first = cd.track(1).unwrap();
    assert_eq!(first.isrc(), Some("GBAYE0000001"));
    assert!(!first.flags().copy_permitted);
    assert_eq!(first.length(), Some(18_000));
    assert_eq!(first.indices(), &[0, 0]);

    let second = cd.track(2).unwrap();
    assert!(second.flags().copy_permitted);
    assert_eq!(second.start(), 18_000);
    assert_eq!(second.indices(), &[0, 105, 4_605]);

    let points = breakpoints(&cd, GapMode::Append).unwrap();
    assert_eq!(format_breakpoints(&points), "4:01.30\n");
    let points = breakpoints(&cd, GapMode::Split).unwrap();
    assert_eq!(format_breakpoints(&points), "4:00.00\n4:01.30\n");
}

#[test]
fn report_uses_templates() {
    let cd = parse_str(Format::Cue, TWO_TRACK_CUE).unwrap();
    let templates = Templates {
        disc: "%P - %T (%N tracks)\\n".to_string(),
        track: "%02n. %-8t|%q\\n".to_string(),
    };

    assert_eq!(
        render_report(&cd, &templates, Selection::All).unwrap(),
        "The Band - First Album (2 tracks)\n01. Opening |q\n02. Closing |q\n"
    );
    assert_eq!(render("%t", &cd, 1).unwrap(), "Opening");
    assert_eq!(render("a\\tb", &cd, 0).unwrap(), "a\tb");
    assert!(matches!(
        render("50%", &cd, 0),
        Err(TemplateError::UnterminatedConversion { offset: 2 })
    ));
}

#[test]
fn converts_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("album.cue");
    let output = dir.path().join("album.toc");
    fs::write(&input, TWO_TRACK_CUE).unwrap();

    let from = input_format(None, Some(&input)).unwrap();
    let to = output_format(None, Some(&output), from);
    assert_eq!((from, to), (Format::Cue, Format::Toc));

    let cd = read_disc(Some(&input), from).unwrap();
    write_disc(&cd, Some(&output), to).unwrap();

    let reread = read_disc(Some(&output), to).unwrap();
    assert_eq!(reread, cd);
}

#[test]
fn byte_order_mark_and_latin1_are_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bom.cue");
    let mut bytes = b"\xEF\xBB\xBFTITLE \"Caf\xE9\"\n".to_vec();
    bytes.extend_from_slice(b"FILE a.wav WAVE\nTRACK 01 AUDIO\nINDEX 01 00:00:00\n");
    fs::write(&input, bytes).unwrap();

    let cd = read_disc(Some(&input), Format::Cue).unwrap();
    assert_eq!(cd.cdtext().get(Pti::Title), Some("Caf\u{fffd}"));
    assert_eq!(cd.track_count(), 1);
}
