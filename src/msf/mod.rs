pub use crate::msf::error::{MsfError, MsfResult};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Display;
use std::str::FromStr;

pub mod error;

pub const FRAMES_PER_SECOND: u32 = 75;
pub const SECONDS_PER_MINUTE: u32 = 60;
pub const FRAMES_PER_MINUTE: u32 = FRAMES_PER_SECOND * SECONDS_PER_MINUTE;

lazy_static! {
    static ref MSF_PATTERN: Regex = Regex::new(r"^(\d+):(\d+):(\d+)$").unwrap();
}

/// A minute:second:frame position. Minutes are not capped at 99.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Msf {
    pub minutes: u32,
    pub seconds: u32,
    pub frames: u32,
}

impl Msf {
    pub fn new(minutes: u32, seconds: u32, frames: u32) -> Self {
        Self {
            minutes,
            seconds,
            frames,
        }
    }

    pub fn from_frames(frame: u32) -> Self {
        let (minutes, seconds, frames) = frame_to_msf(frame);
        Self::new(minutes, seconds, frames)
    }

    pub fn to_frames(&self) -> u32 {
        msf_to_frame(self.minutes, self.seconds, self.frames)
    }

    fn checked_frames(&self) -> Option<u32> {
        self.minutes
            .checked_mul(SECONDS_PER_MINUTE)?
            .checked_add(self.seconds)?
            .checked_mul(FRAMES_PER_SECOND)?
            .checked_add(self.frames)
    }
}

impl Display for Msf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.minutes, self.seconds, self.frames)
    }
}

impl FromStr for Msf {
    type Err = MsfError;

    fn from_str(s: &str) -> MsfResult<Self> {
        let caps = MSF_PATTERN
            .captures(s)
            .ok_or_else(|| MsfError::InvalidFormat(s.to_string()))?;

        let field = |i: usize| -> MsfResult<u32> {
            caps[i]
                .parse::<u32>()
                .map_err(|_| MsfError::Overflow(s.to_string()))
        };

        let msf = Msf::new(field(1)?, field(2)?, field(3)?);

        if msf.seconds >= SECONDS_PER_MINUTE {
            return Err(MsfError::SecondsOutOfRange(s.to_string()));
        }
        if msf.frames >= FRAMES_PER_SECOND {
            return Err(MsfError::FramesOutOfRange(s.to_string()));
        }
        if msf.checked_frames().is_none() {
            return Err(MsfError::Overflow(s.to_string()));
        }

        Ok(msf)
    }
}

/// Splits a linear frame count into (minutes, seconds, frames).
pub fn frame_to_msf(frame: u32) -> (u32, u32, u32) {
    let minutes = frame / FRAMES_PER_MINUTE;
    let seconds = (frame / FRAMES_PER_SECOND) % SECONDS_PER_MINUTE;
    let frames = frame % FRAMES_PER_SECOND;

    (minutes, seconds, frames)
}

pub fn msf_to_frame(minutes: u32, seconds: u32, frames: u32) -> u32 {
    (minutes * SECONDS_PER_MINUTE + seconds) * FRAMES_PER_SECOND + frames
}

/// Parses an `mm:ss:ff` string straight into a frame count.
pub fn parse_frames(s: &str) -> MsfResult<u32> {
    Ok(s.parse::<Msf>()?.to_frames())
}

/// Formats a frame count as `M:SS.FF`, the form used for split points.
pub fn format_breakpoint(frame: u32) -> String {
    let (minutes, seconds, frames) = frame_to_msf(frame);
    format!("{minutes}:{seconds:02}.{frames:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_to_msf_splits_minutes_seconds_frames() {
        assert_eq!(frame_to_msf(0), (0, 0, 0));
        assert_eq!(frame_to_msf(74), (0, 0, 74));
        assert_eq!(frame_to_msf(75), (0, 1, 0));
        assert_eq!(frame_to_msf(4500), (1, 0, 0));
        assert_eq!(frame_to_msf(13_500 + 75 * 7 + 12), (3, 7, 12));
    }

    #[test]
    fn minutes_are_not_capped() {
        let frame = msf_to_frame(120, 30, 10);
        assert_eq!(frame_to_msf(frame), (120, 30, 10));
    }

    #[test]
    fn parses_msf_strings() {
        assert_eq!("03:00:00".parse::<Msf>().unwrap(), Msf::new(3, 0, 0));
        assert_eq!("1:2:3".parse::<Msf>().unwrap(), Msf::new(1, 2, 3));
        assert_eq!(parse_frames("00:02:00").unwrap(), 150);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert_eq!(
            "00:60:00".parse::<Msf>(),
            Err(MsfError::SecondsOutOfRange("00:60:00".to_string()))
        );
        assert_eq!(
            "00:00:75".parse::<Msf>(),
            Err(MsfError::FramesOutOfRange("00:00:75".to_string()))
        );
    }

    #[test]
    fn rejects_malformed_strings() {
        for input in ["", "00:00", "aa:bb:cc", "00:00:00:00", "-1:00:00", "00:00:0x"] {
            assert!(matches!(
                input.parse::<Msf>(),
                Err(MsfError::InvalidFormat(_))
            ));
        }
    }

    #[test]
    fn rejects_overflowing_minutes() {
        assert!(matches!(
            "99999999999:00:00".parse::<Msf>(),
            Err(MsfError::Overflow(_))
        ));
        assert!(matches!(
            "9999999:00:00".parse::<Msf>(),
            Err(MsfError::Overflow(_))
        ));
    }

    #[test]
    fn displays_with_two_digit_fields() {
        assert_eq!(Msf::from_frames(150).to_string(), "00:02:00");
        assert_eq!(Msf::new(104, 5, 3).to_string(), "104:05:03");
    }

    #[test]
    fn formats_breakpoints() {
        assert_eq!(format_breakpoint(13_500), "3:00.00");
        assert_eq!(format_breakpoint(msf_to_frame(12, 3, 45)), "12:03.45");
    }
}
