use crate::disc::{Cd, DiscMode, Pti, Track, TrackMode};
use crate::msf::parse_frames;
use crate::parser::add_frames;
use crate::parser::error::{ParseError, ParseResult};
use crate::parser::lexer::{Token, tokenize_cue_line};

const MAX_INDEX: usize = 99;

/// Line-oriented parser for CUE sheets.
pub struct CueParser<'a> {
    input: &'a str,
    cd: Cd,
    current_file: Option<String>,
    file_changed: bool,
    track: Option<TrackState>,
}

/// Bookkeeping for the track being filled in.
#[derive(Debug, Default)]
struct TrackState {
    shares_file: bool,
    start: Option<u32>,
    last_index: Option<usize>,
}

impl<'a> CueParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cd: Cd::new(),
            current_file: None,
            file_changed: false,
            track: None,
        }
    }

    pub fn parse(mut self) -> ParseResult<Cd> {
        let mut line_number = 0;

        for (i, line) in self.input.lines().enumerate() {
            line_number = i + 1;
            if is_skipped_line(line) {
                continue;
            }
            let tokens = tokenize_cue_line(line, line_number)?;
            let Some((keyword, args)) = tokens.split_first() else {
                continue;
            };
            let Some(keyword) = keyword.text() else {
                continue;
            };

            self.command(&keyword.to_ascii_uppercase(), args, line_number)?;
        }

        self.close_track(line_number)?;

        let mode = DiscMode::from_tracks(self.cd.tracks());
        self.cd.set_mode(mode);

        Ok(self.cd)
    }

    fn command(&mut self, keyword: &str, args: &[Token], line: usize) -> ParseResult<()> {
        match keyword {
            "CATALOG" => {
                let catalog = Self::argument(keyword, args, line)?;
                self.cd.set_catalog(catalog);
            }
            "FILE" => {
                let filename = Self::argument(keyword, args, line)?;
                self.current_file = Some(filename.to_string());
                self.file_changed = true;
            }
            "TRACK" => self.start_track(args, line)?,
            "INDEX" => self.index(args, line)?,
            "PREGAP" => {
                let frames = Self::time(keyword, args, line)?;
                if self.state(keyword, line)?.start.is_some() {
                    return Err(ParseError::MisplacedKeyword {
                        line,
                        keyword: keyword.to_string(),
                    });
                }
                self.current_track(keyword, line)?.set_pregap(frames);
            }
            "POSTGAP" => {
                let frames = Self::time(keyword, args, line)?;
                self.current_track(keyword, line)?.set_postgap(frames);
            }
            "FLAGS" => {
                let flags = self.current_track(keyword, line)?.flags_mut();
                for flag in args.iter().filter_map(Token::text) {
                    match flag.to_ascii_uppercase().as_str() {
                        "DCP" => flags.copy_permitted = true,
                        "4CH" => flags.four_channel = true,
                        "PRE" => flags.pre_emphasis = true,
                        "SCMS" => flags.scms = true,
                        _ => {}
                    }
                }
            }
            "ISRC" => {
                let isrc = Self::text(keyword, args, line)?;
                match self.cd.last_track_mut() {
                    Some(track) => track.set_isrc(isrc),
                    None => self.cd.cdtext_mut().set(Pti::UpcIsrc, isrc),
                }
            }
            _ => {
                if let Some(pti) = Pti::from_keyword(keyword) {
                    let value = Self::text(keyword, args, line)?;
                    match self.cd.last_track_mut() {
                        Some(track) => track.cdtext_mut().set(pti, value),
                        None => self.cd.cdtext_mut().set(pti, value),
                    }
                }
            }
        }

        Ok(())
    }

    fn start_track(&mut self, args: &[Token], line: usize) -> ParseResult<()> {
        self.close_track(line)?;

        let number = Self::argument("TRACK", args, line)?;
        let number = number
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidNumber {
                line,
                value: number.to_string(),
            })?;

        let mode = args
            .get(1)
            .and_then(Token::text)
            .ok_or_else(|| ParseError::MissingArgument {
                line,
                keyword: "TRACK".to_string(),
            })?;
        let mode = TrackMode::from_cue_keyword(mode).ok_or_else(|| ParseError::UnknownTrackMode {
            line,
            mode: mode.to_string(),
        })?;

        let shares_file = self.cd.track_count() > 0 && !self.file_changed;
        self.file_changed = false;

        let track = self
            .cd
            .add_track(number, mode)
            .map_err(ParseError::model(line))?;
        if let Some(filename) = &self.current_file {
            track.set_filename(filename.clone());
        }

        self.track = Some(TrackState {
            shares_file,
            ..Default::default()
        });

        Ok(())
    }

    fn index(&mut self, args: &[Token], line: usize) -> ParseResult<()> {
        let number = Self::argument("INDEX", args, line)?;
        let number = number
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidNumber {
                line,
                value: number.to_string(),
            })?;
        if number > MAX_INDEX {
            return Err(ParseError::IndexOutOfRange {
                line,
                index: number,
            });
        }

        let time = args
            .get(1)
            .and_then(Token::text)
            .ok_or_else(|| ParseError::MissingArgument {
                line,
                keyword: "INDEX".to_string(),
            })?;
        let time = parse_frames(time).map_err(ParseError::time(line))?;

        let track_number = self.cd.track_count();
        let state = self.state("INDEX", line)?;

        if state.last_index.is_some_and(|last| number <= last) {
            return Err(ParseError::IndexOutOfSequence {
                line,
                track: track_number,
                index: number,
            });
        }
        state.last_index = Some(number);

        let first_index = state.start.is_none();
        let shares_file = state.shares_file;
        let start = *state.start.get_or_insert(time);
        if time < start {
            return Err(ParseError::TimeOutOfOrder {
                line,
                track: track_number,
            });
        }

        if first_index && shares_file {
            self.bound_previous_track(time, line)?;
        }

        let track = self.current_track("INDEX", line)?;
        if first_index {
            track.set_start(start);
            if number > 0 {
                track.set_index(0, 0).map_err(ParseError::model(line))?;
            }
        }

        let value = add_frames(track.pregap(), time - start, line)?;
        track
            .set_index(number, value)
            .map_err(ParseError::model(line))?;

        Ok(())
    }

    /// Sets the length of the previous track now that the track sharing its
    /// file has a known start.
    fn bound_previous_track(&mut self, time: u32, line: usize) -> ParseResult<()> {
        let number = self.cd.track_count() - 1;
        let previous = self.cd.track_mut(number).map_err(ParseError::model(line))?;
        let length = time
            .checked_sub(previous.start())
            .ok_or(ParseError::TimeOutOfOrder {
                line,
                track: number + 1,
            })?;

        previous.set_length(length);
        Ok(())
    }

    fn close_track(&mut self, line: usize) -> ParseResult<()> {
        if self.track.take().is_none() {
            return Ok(());
        }

        let track = self.cd.track(self.cd.track_count()).map_err(ParseError::model(line))?;
        if track.index(1).is_none() {
            return Err(ParseError::MissingIndexOne {
                line,
                track: track.number(),
            });
        }

        Ok(())
    }

    fn state(&mut self, keyword: &str, line: usize) -> ParseResult<&mut TrackState> {
        self.track.as_mut().ok_or_else(|| ParseError::NoCurrentTrack {
            line,
            keyword: keyword.to_string(),
        })
    }

    fn current_track(&mut self, keyword: &str, line: usize) -> ParseResult<&mut Track> {
        self.cd
            .last_track_mut()
            .ok_or_else(|| ParseError::NoCurrentTrack {
                line,
                keyword: keyword.to_string(),
            })
    }

    fn argument<'t>(keyword: &str, args: &'t [Token], line: usize) -> ParseResult<&'t str> {
        args.first()
            .and_then(Token::text)
            .ok_or_else(|| ParseError::MissingArgument {
                line,
                keyword: keyword.to_string(),
            })
    }

    /// Free text argument. Unquoted text running over several words is
    /// joined back together.
    fn text(keyword: &str, args: &[Token], line: usize) -> ParseResult<String> {
        let words: Vec<&str> = args.iter().filter_map(Token::text).collect();
        if words.is_empty() {
            return Err(ParseError::MissingArgument {
                line,
                keyword: keyword.to_string(),
            });
        }
        Ok(words.join(" "))
    }

    fn time(keyword: &str, args: &[Token], line: usize) -> ParseResult<u32> {
        let time = Self::argument(keyword, args, line)?;
        parse_frames(time).map_err(ParseError::time(line))
    }
}

/// Comment and CD-TEXT file lines carry free text that is never tokenized.
fn is_skipped_line(line: &str) -> bool {
    line.split_whitespace().next().is_some_and(|keyword| {
        keyword.eq_ignore_ascii_case("REM") || keyword.eq_ignore_ascii_case("CDTEXTFILE")
    })
}
