use crate::disc::{Cd, Pti, Track};
use crate::template::conversion::Value;
use lazy_static::lazy_static;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiscField {
    Cdtext(Pti),
    TrackCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackField {
    Cdtext(Pti),
    Filename,
    Isrc,
    Number,
}

lazy_static! {
    static ref DISC_FIELDS: HashMap<char, DiscField> = HashMap::from([
        ('A', DiscField::Cdtext(Pti::Arranger)),
        ('C', DiscField::Cdtext(Pti::Composer)),
        ('G', DiscField::Cdtext(Pti::Genre)),
        ('M', DiscField::Cdtext(Pti::Message)),
        ('N', DiscField::TrackCount),
        ('P', DiscField::Cdtext(Pti::Performer)),
        ('R', DiscField::Cdtext(Pti::Performer)),
        ('S', DiscField::Cdtext(Pti::Songwriter)),
        ('T', DiscField::Cdtext(Pti::Title)),
        ('U', DiscField::Cdtext(Pti::UpcIsrc)),
    ]);
    static ref TRACK_FIELDS: HashMap<char, TrackField> = HashMap::from([
        ('a', TrackField::Cdtext(Pti::Arranger)),
        ('c', TrackField::Cdtext(Pti::Composer)),
        ('f', TrackField::Filename),
        ('g', TrackField::Cdtext(Pti::Genre)),
        ('i', TrackField::Isrc),
        ('m', TrackField::Cdtext(Pti::Message)),
        ('n', TrackField::Number),
        ('p', TrackField::Cdtext(Pti::Performer)),
        ('s', TrackField::Cdtext(Pti::Songwriter)),
        ('t', TrackField::Cdtext(Pti::Title)),
        ('u', TrackField::Cdtext(Pti::UpcIsrc)),
    ]);
}

/// Resolves a field letter. Track scope falls back to the disc table, and
/// a letter neither table knows renders as itself.
pub fn lookup<'a>(cd: &'a Cd, track: Option<&'a Track>, letter: char) -> Value<'a> {
    let track_value = track.and_then(|track| {
        TRACK_FIELDS.get(&letter).map(|field| match field {
            TrackField::Cdtext(pti) => Value::Str(track.cdtext().get(*pti)),
            TrackField::Filename => Value::Str(track.filename()),
            TrackField::Isrc => Value::Str(track.isrc()),
            TrackField::Number => Value::Int(track.number() as i64),
        })
    });

    track_value
        .or_else(|| {
            DISC_FIELDS.get(&letter).map(|field| match field {
                DiscField::Cdtext(pti) => Value::Str(cd.cdtext().get(*pti)),
                DiscField::TrackCount => Value::Int(cd.track_count() as i64),
            })
        })
        .unwrap_or(Value::Char(letter))
}
