use crate::disc::{Cd, ModelError, ModelResult, Track};
use crate::msf::format_breakpoint;

/// Where the pregap of a track goes when the disc is split into files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GapMode {
    /// Split at index 1; the pregap stays at the end of the previous track.
    #[default]
    Append,
    /// Split at index 0; the pregap starts the track.
    Prepend,
    /// Split at both index 0 and index 1; the pregap becomes its own piece.
    Split,
}

/// Computes the split points of a disc, in frames, in track order.
///
/// Track 1 has no boundary before it and is never reported, but every
/// track must carry index 1. Points at frame 0 are skipped.
pub fn breakpoints(cd: &Cd, mode: GapMode) -> ModelResult<Vec<u32>> {
    let mut points = Vec::new();

    for track in cd.tracks() {
        if track.number() == 1 {
            track.index(1).ok_or(ModelError::MissingIndex { track: 1, index: 1 })?;
            continue;
        }
        let index1 = track.file_offset(1)?;

        let candidates = match mode {
            GapMode::Append => [None, Some(index1)],
            GapMode::Prepend => [Some(pregap_offset(track, index1)), None],
            GapMode::Split => {
                let index0 = pregap_offset(track, index1);
                [Some(index0), (index0 != index1).then_some(index1)]
            }
        };
        points.extend(candidates.into_iter().flatten().filter(|&b| b != 0));
    }

    Ok(points)
}

/// Formats split points one per line as `M:SS.FF`.
pub fn format_breakpoints(points: &[u32]) -> String {
    points
        .iter()
        .map(|&frame| format_breakpoint(frame) + "\n")
        .collect()
}

// File offset of index 0, clamped to the track start when it falls inside
// the silent pregap. Tracks without index 0 split at index 1.
fn pregap_offset(track: &Track, index1: u32) -> u32 {
    match track.index(0) {
        Some(index0) => track.start() + index0.saturating_sub(track.pregap()),
        None => index1,
    }
}
