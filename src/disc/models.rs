use crate::disc::cdtext::Cdtext;
use crate::disc::error::{ModelError, ModelResult};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiscMode {
    #[default]
    CdDa,
    CdRom,
    CdRomXa,
    CdI,
}

impl DiscMode {
    pub fn toc_keyword(&self) -> &'static str {
        match self {
            DiscMode::CdDa => "CD_DA",
            DiscMode::CdRom => "CD_ROM",
            DiscMode::CdRomXa => "CD_ROM_XA",
            DiscMode::CdI => "CD_I",
        }
    }

    pub fn from_toc_keyword(keyword: &str) -> Option<DiscMode> {
        match keyword {
            "CD_DA" => Some(DiscMode::CdDa),
            "CD_ROM" => Some(DiscMode::CdRom),
            "CD_ROM_XA" => Some(DiscMode::CdRomXa),
            "CD_I" => Some(DiscMode::CdI),
            _ => None,
        }
    }

    /// Disc mode implied by a track list, for sources that do not state one.
    pub fn from_tracks(tracks: &[Track]) -> DiscMode {
        if tracks.iter().any(|t| t.mode().is_mode2()) {
            DiscMode::CdRomXa
        } else if tracks.iter().all(|t| t.mode().is_audio()) {
            DiscMode::CdDa
        } else {
            DiscMode::CdRom
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackMode {
    #[default]
    Audio,
    Mode1,
    Mode1Raw,
    Mode2,
    Mode2Form1,
    Mode2Form2,
    Mode2FormMix,
    Mode2Raw,
}

impl TrackMode {
    pub fn is_audio(&self) -> bool {
        matches!(self, TrackMode::Audio)
    }

    pub fn is_mode2(&self) -> bool {
        matches!(
            self,
            TrackMode::Mode2
                | TrackMode::Mode2Form1
                | TrackMode::Mode2Form2
                | TrackMode::Mode2FormMix
                | TrackMode::Mode2Raw
        )
    }

    pub fn cue_keyword(&self) -> &'static str {
        match self {
            TrackMode::Audio => "AUDIO",
            TrackMode::Mode1 => "MODE1/2048",
            TrackMode::Mode1Raw => "MODE1/2352",
            TrackMode::Mode2
            | TrackMode::Mode2Form1
            | TrackMode::Mode2Form2
            | TrackMode::Mode2FormMix => "MODE2/2336",
            TrackMode::Mode2Raw => "MODE2/2352",
        }
    }

    pub fn from_cue_keyword(keyword: &str) -> Option<TrackMode> {
        let mode = match keyword.to_ascii_uppercase().as_str() {
            "AUDIO" | "CDG" => TrackMode::Audio,
            "MODE1/2048" => TrackMode::Mode1,
            "MODE1/2352" => TrackMode::Mode1Raw,
            "MODE2/2336" | "CDI/2336" => TrackMode::Mode2,
            "MODE2/2352" | "CDI/2352" => TrackMode::Mode2Raw,
            _ => return None,
        };

        Some(mode)
    }

    pub fn toc_keyword(&self) -> &'static str {
        match self {
            TrackMode::Audio => "AUDIO",
            TrackMode::Mode1 => "MODE1",
            TrackMode::Mode1Raw => "MODE1_RAW",
            TrackMode::Mode2 => "MODE2",
            TrackMode::Mode2Form1 => "MODE2_FORM1",
            TrackMode::Mode2Form2 => "MODE2_FORM2",
            TrackMode::Mode2FormMix => "MODE2_FORM_MIX",
            TrackMode::Mode2Raw => "MODE2_RAW",
        }
    }

    pub fn from_toc_keyword(keyword: &str) -> Option<TrackMode> {
        let mode = match keyword {
            "AUDIO" => TrackMode::Audio,
            "MODE1" => TrackMode::Mode1,
            "MODE1_RAW" => TrackMode::Mode1Raw,
            "MODE2" => TrackMode::Mode2,
            "MODE2_FORM1" => TrackMode::Mode2Form1,
            "MODE2_FORM2" => TrackMode::Mode2Form2,
            "MODE2_FORM_MIX" => TrackMode::Mode2FormMix,
            "MODE2_RAW" => TrackMode::Mode2Raw,
            _ => return None,
        };

        Some(mode)
    }
}

impl Display for TrackMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.toc_keyword())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackFlags {
    pub copy_permitted: bool,
    pub pre_emphasis: bool,
    pub four_channel: bool,
    pub scms: bool,
}

impl TrackFlags {
    pub fn is_empty(&self) -> bool {
        *self == TrackFlags::default()
    }
}

/// One track of a disc.
///
/// Index values are frame offsets from the beginning of the track data,
/// silent pregap included. `start` is where that data begins inside the
/// track's file, silent pregap excluded, so the file position of index
/// `n` is `start + index(n) - pregap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    number: usize,
    mode: TrackMode,
    flags: TrackFlags,
    filename: Option<String>,
    isrc: Option<String>,
    start: u32,
    length: Option<u32>,
    zero_pre: u32,
    zero_post: u32,
    indices: Vec<u32>,
    cdtext: Cdtext,
}

impl Track {
    pub fn new(number: usize, mode: TrackMode) -> Self {
        Self {
            number,
            mode,
            flags: TrackFlags::default(),
            filename: None,
            isrc: None,
            start: 0,
            length: None,
            zero_pre: 0,
            zero_post: 0,
            indices: Vec::new(),
            cdtext: Cdtext::new(),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn mode(&self) -> TrackMode {
        self.mode
    }

    pub fn flags(&self) -> TrackFlags {
        self.flags
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn isrc(&self) -> Option<&str> {
        self.isrc.as_deref()
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn length(&self) -> Option<u32> {
        self.length
    }

    /// Frames of silence ahead of the track data that are not stored in
    /// the file ("zero_pre").
    pub fn pregap(&self) -> u32 {
        self.zero_pre
    }

    pub fn postgap(&self) -> u32 {
        self.zero_post
    }

    pub fn index(&self, index: usize) -> Option<u32> {
        self.indices.get(index).copied()
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn cdtext(&self) -> &Cdtext {
        &self.cdtext
    }

    /// Position of index `index` inside the track's file.
    pub fn file_offset(&self, index: usize) -> ModelResult<u32> {
        let value = self.index(index).ok_or(ModelError::MissingIndex {
            track: self.number,
            index,
        })?;

        self.start
            .saturating_add(value)
            .checked_sub(self.zero_pre)
            .ok_or(ModelError::NegativeOffset {
                track: self.number,
                index,
            })
    }

    pub fn set_mode(&mut self, mode: TrackMode) {
        self.mode = mode;
    }

    pub fn flags_mut(&mut self) -> &mut TrackFlags {
        &mut self.flags
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = Some(filename.into());
    }

    pub fn set_isrc(&mut self, isrc: impl Into<String>) {
        self.isrc = Some(isrc.into());
    }

    pub fn set_start(&mut self, start: u32) {
        self.start = start;
    }

    pub fn set_length(&mut self, length: u32) {
        self.length = Some(length);
    }

    pub fn set_pregap(&mut self, frames: u32) {
        self.zero_pre = frames;
    }

    pub fn set_postgap(&mut self, frames: u32) {
        self.zero_post = frames;
    }

    /// Sets index `index`, filling any skipped index numbers with the same
    /// value. Values must stay non-decreasing by index number.
    pub fn set_index(&mut self, index: usize, frames: u32) -> ModelResult<()> {
        let out_of_order = ModelError::IndexOutOfOrder {
            track: self.number,
            index,
        };

        let previous = match index {
            0 => None,
            _ => self.indices.get(index - 1).or(self.indices.last()),
        };
        if previous.is_some_and(|&p| p > frames) {
            return Err(out_of_order);
        }
        if self.indices.get(index + 1).is_some_and(|&n| n < frames) {
            return Err(out_of_order);
        }

        if index < self.indices.len() {
            self.indices[index] = frames;
        } else {
            self.indices.resize(index + 1, frames);
        }

        Ok(())
    }

    pub fn cdtext_mut(&mut self) -> &mut Cdtext {
        &mut self.cdtext
    }
}

/// A whole disc: catalog number, disc CD-TEXT and tracks `1..=N`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cd {
    mode: DiscMode,
    catalog: Option<String>,
    cdtext: Cdtext,
    tracks: Vec<Track>,
}

impl Cd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DiscMode {
        self.mode
    }

    pub fn catalog(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    pub fn cdtext(&self) -> &Cdtext {
        &self.cdtext
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Track by 1-based number.
    pub fn track(&self, number: usize) -> ModelResult<&Track> {
        let count = self.tracks.len();
        number
            .checked_sub(1)
            .and_then(|i| self.tracks.get(i))
            .ok_or(ModelError::TrackOutOfRange { number, count })
    }

    pub fn track_cdtext(&self, number: usize) -> ModelResult<&Cdtext> {
        Ok(self.track(number)?.cdtext())
    }

    pub fn set_mode(&mut self, mode: DiscMode) {
        self.mode = mode;
    }

    pub fn set_catalog(&mut self, catalog: impl Into<String>) {
        self.catalog = Some(catalog.into());
    }

    pub fn cdtext_mut(&mut self) -> &mut Cdtext {
        &mut self.cdtext
    }

    /// Appends track `number`, which must be the next one in sequence.
    pub fn add_track(&mut self, number: usize, mode: TrackMode) -> ModelResult<&mut Track> {
        let expected = self.tracks.len() + 1;
        if number != expected {
            return Err(ModelError::TrackOutOfSequence {
                expected,
                found: number,
            });
        }

        self.tracks.push(Track::new(number, mode));
        Ok(&mut self.tracks[number - 1])
    }

    pub fn track_mut(&mut self, number: usize) -> ModelResult<&mut Track> {
        let count = self.tracks.len();
        number
            .checked_sub(1)
            .and_then(|i| self.tracks.get_mut(i))
            .ok_or(ModelError::TrackOutOfRange { number, count })
    }

    pub fn last_track_mut(&mut self) -> Option<&mut Track> {
        self.tracks.last_mut()
    }
}
