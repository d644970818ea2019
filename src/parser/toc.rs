use crate::disc::{Cd, DiscMode, Pti, Track, TrackMode};
use crate::msf::{FRAMES_PER_SECOND, parse_frames};
use crate::parser::error::{ParseError, ParseResult};
use crate::parser::add_frames;
use crate::parser::lexer::{Lexeme, Token, tokenize_toc};

const MAX_INDEX: usize = 99;
const SAMPLES_PER_FRAME: u32 = 44_100 / FRAMES_PER_SECOND;

/// Token-stream parser for cdrdao-style TOC files.
pub struct TocParser {
    lexemes: Vec<Lexeme>,
    pos: usize,
    cd: Cd,
    track: Option<TrackState>,
}

/// Bookkeeping for the track being filled in.
#[derive(Debug, Default)]
struct TrackState {
    has_file: bool,
    data_length: u32,
    file_length: Option<u32>,
    started: bool,
    next_index: usize,
}

impl TrackState {
    fn add_file_length(&mut self, length: u32, line: usize) -> ParseResult<()> {
        self.data_length = add_frames(self.data_length, length, line)?;
        self.file_length = Some(add_frames(self.file_length.unwrap_or(0), length, line)?);
        Ok(())
    }
}

impl TocParser {
    pub fn new(input: &str) -> ParseResult<Self> {
        Ok(Self {
            lexemes: tokenize_toc(input)?,
            pos: 0,
            cd: Cd::new(),
            track: None,
        })
    }

    pub fn parse(mut self) -> ParseResult<Cd> {
        while let Some(lexeme) = self.next() {
            let line = lexeme.line;
            let keyword = match lexeme.token {
                Token::Word(word) => word,
                other => {
                    return Err(ParseError::UnexpectedToken {
                        line,
                        expected: "a keyword",
                        found: other.to_string(),
                    });
                }
            };

            self.statement(&keyword, line)?;
        }

        let line = self.last_line();
        self.close_track(line)?;

        Ok(self.cd)
    }

    fn statement(&mut self, keyword: &str, line: usize) -> ParseResult<()> {
        if let Some(mode) = DiscMode::from_toc_keyword(keyword) {
            self.cd.set_mode(mode);
            return Ok(());
        }

        match keyword {
            "CATALOG" => {
                let catalog = self.text(keyword, line)?;
                self.cd.set_catalog(catalog);
            }
            "CD_TEXT" => {
                for (pti, value) in self.cdtext_block(line)? {
                    match self.cd.last_track_mut() {
                        Some(track) => track.cdtext_mut().set(pti, value),
                        None => self.cd.cdtext_mut().set(pti, value),
                    }
                }
            }
            "TRACK" => self.start_track(line)?,
            "NO" => {
                let what = self.text(keyword, line)?;
                let flags = self.current_track(keyword, line)?.flags_mut();
                match what.as_str() {
                    "COPY" => flags.copy_permitted = false,
                    "PRE_EMPHASIS" => flags.pre_emphasis = false,
                    _ => {
                        return Err(ParseError::UnexpectedToken {
                            line,
                            expected: "COPY or PRE_EMPHASIS",
                            found: what,
                        });
                    }
                }
            }
            "COPY" => self.current_track(keyword, line)?.flags_mut().copy_permitted = true,
            "PRE_EMPHASIS" => self.current_track(keyword, line)?.flags_mut().pre_emphasis = true,
            "TWO_CHANNEL_AUDIO" => {
                self.current_track(keyword, line)?.flags_mut().four_channel = false
            }
            "FOUR_CHANNEL_AUDIO" => {
                self.current_track(keyword, line)?.flags_mut().four_channel = true
            }
            "ISRC" => {
                let isrc = self.text(keyword, line)?;
                self.current_track(keyword, line)?.set_isrc(isrc);
            }
            "SILENCE" | "ZERO" => self.silence(keyword, line)?,
            "AUDIOFILE" | "FILE" => self.audio_file(keyword, line)?,
            "DATAFILE" | "FIFO" => self.data_file(keyword, line)?,
            "START" => self.start(line)?,
            "PREGAP" => self.pregap(line)?,
            "INDEX" => self.index(line)?,
            _ => self.skip_statement(line)?,
        }

        Ok(())
    }

    fn start_track(&mut self, line: usize) -> ParseResult<()> {
        self.close_track(line)?;

        let mode = self.text("TRACK", line)?;
        let mode = TrackMode::from_toc_keyword(&mode)
            .ok_or(ParseError::UnknownTrackMode { line, mode })?;

        // optional sub-channel mode
        if self.peek().is_some_and(|l| l.token.is_word("RW") || l.token.is_word("RW_RAW")) {
            self.next();
        }

        let number = self.cd.track_count() + 1;
        self.cd
            .add_track(number, mode)
            .map_err(ParseError::model(line))?;
        self.track = Some(TrackState {
            next_index: 2,
            ..Default::default()
        });

        Ok(())
    }

    fn close_track(&mut self, line: usize) -> ParseResult<()> {
        let Some(state) = self.track.take() else {
            return Ok(());
        };

        let track = self.current_track("TRACK", line)?;
        if !state.started {
            track.set_index(0, 0).map_err(ParseError::model(line))?;
            track.set_index(1, 0).map_err(ParseError::model(line))?;
        }
        if let Some(length) = state.file_length {
            track.set_length(length);
        }

        Ok(())
    }

    fn silence(&mut self, keyword: &str, line: usize) -> ParseResult<()> {
        // ZERO may name a data mode and a sub-channel mode before its length
        while self
            .peek()
            .is_some_and(|l| l.line == line && matches!(&l.token, Token::Word(w) if !is_time(w)))
        {
            self.next();
        }
        let frames = self.time(keyword, line)?;

        let has_file = self.state(keyword, line)?.has_file;
        let track = self.current_track(keyword, line)?;
        if has_file {
            let total = add_frames(track.postgap(), frames, line)?;
            track.set_postgap(total);
        } else {
            let total = add_frames(track.pregap(), frames, line)?;
            track.set_pregap(total);
            let state = self.state(keyword, line)?;
            state.data_length = add_frames(state.data_length, frames, line)?;
        }

        Ok(())
    }

    fn audio_file(&mut self, keyword: &str, line: usize) -> ParseResult<()> {
        let filename = self.text(keyword, line)?;
        let start = self.time(keyword, line)?;
        let length = self.optional_time(line)?;

        let state = self.state(keyword, line)?;
        let first_file = !state.has_file;
        state.has_file = true;
        if let Some(length) = length {
            state.add_file_length(length, line)?;
        }

        if first_file {
            let track = self.current_track(keyword, line)?;
            track.set_filename(filename);
            track.set_start(start);
        }

        Ok(())
    }

    fn data_file(&mut self, keyword: &str, line: usize) -> ParseResult<()> {
        let filename = self.text(keyword, line)?;
        let length = self.optional_time(line)?;

        let state = self.state(keyword, line)?;
        let first_file = !state.has_file;
        state.has_file = true;
        if let Some(length) = length {
            state.add_file_length(length, line)?;
        }

        if first_file {
            self.current_track(keyword, line)?.set_filename(filename);
        }

        Ok(())
    }

    fn start(&mut self, line: usize) -> ParseResult<()> {
        let time = self.optional_time(line)?;
        let state = self.state("START", line)?;
        if state.started {
            return Err(ParseError::MisplacedKeyword {
                line,
                keyword: "START".to_string(),
            });
        }
        state.started = true;
        let frames = time.unwrap_or(state.data_length);

        let track = self.current_track("START", line)?;
        track.set_index(0, 0).map_err(ParseError::model(line))?;
        track.set_index(1, frames).map_err(ParseError::model(line))?;

        Ok(())
    }

    fn pregap(&mut self, line: usize) -> ParseResult<()> {
        let frames = self.time("PREGAP", line)?;
        let state = self.state("PREGAP", line)?;
        if state.started {
            return Err(ParseError::MisplacedKeyword {
                line,
                keyword: "PREGAP".to_string(),
            });
        }
        state.started = true;
        state.data_length = add_frames(state.data_length, frames, line)?;

        let track = self.current_track("PREGAP", line)?;
        track.set_pregap(frames);
        track.set_index(0, 0).map_err(ParseError::model(line))?;
        track.set_index(1, frames).map_err(ParseError::model(line))?;

        Ok(())
    }

    fn index(&mut self, line: usize) -> ParseResult<()> {
        let offset = self.time("INDEX", line)?;
        let state = self.state("INDEX", line)?;
        let number = state.next_index;
        if number > MAX_INDEX {
            return Err(ParseError::IndexOutOfRange {
                line,
                index: number,
            });
        }
        let started = state.started;
        state.started = true;
        state.next_index += 1;

        let track = self.current_track("INDEX", line)?;
        if !started {
            track.set_index(0, 0).map_err(ParseError::model(line))?;
            track.set_index(1, 0).map_err(ParseError::model(line))?;
        }
        let base = track.index(1).unwrap_or(0);
        track
            .set_index(number, add_frames(base, offset, line)?)
            .map_err(ParseError::model(line))?;

        Ok(())
    }

    /// `CD_TEXT { LANGUAGE_MAP { ... } LANGUAGE n { KEY value ... } }`.
    /// Only language 0 is kept.
    fn cdtext_block(&mut self, line: usize) -> ParseResult<Vec<(Pti, String)>> {
        self.expect_open(line)?;
        let mut fields = Vec::new();

        loop {
            let lexeme = self.require(line, "`}`")?;
            match lexeme.token {
                Token::Close => return Ok(fields),
                Token::Word(w) if w == "LANGUAGE_MAP" => self.skip_block(lexeme.line)?,
                Token::Word(w) if w == "LANGUAGE" => {
                    let language = self.text("LANGUAGE", lexeme.line)?;
                    let keep = language == "0";
                    self.expect_open(lexeme.line)?;
                    self.language_block(keep, &mut fields, lexeme.line)?;
                }
                other => {
                    return Err(ParseError::UnexpectedToken {
                        line: lexeme.line,
                        expected: "LANGUAGE or LANGUAGE_MAP",
                        found: other.to_string(),
                    });
                }
            }
        }
    }

    fn language_block(
        &mut self,
        keep: bool,
        fields: &mut Vec<(Pti, String)>,
        line: usize,
    ) -> ParseResult<()> {
        loop {
            let lexeme = self.require(line, "`}`")?;
            let key = match lexeme.token {
                Token::Close => return Ok(()),
                Token::Word(w) => w,
                other => {
                    return Err(ParseError::UnexpectedToken {
                        line: lexeme.line,
                        expected: "a CD-TEXT item",
                        found: other.to_string(),
                    });
                }
            };

            let value = self.require(lexeme.line, "a CD-TEXT value")?;
            let value = match value.token {
                Token::Str(s) | Token::Word(s) => s,
                // binary payload
                Token::Open => {
                    self.skip_to_close(value.line)?;
                    continue;
                }
                Token::Close => {
                    return Err(ParseError::UnexpectedToken {
                        line: value.line,
                        expected: "a CD-TEXT value",
                        found: Token::Close.to_string(),
                    });
                }
            };

            let pti = match key.as_str() {
                "ISRC" => Some(Pti::UpcIsrc),
                key => Pti::from_keyword(key),
            };
            if let (true, Some(pti)) = (keep, pti) {
                fields.push((pti, value));
            }
        }
    }

    /// Skips an unknown statement: the rest of its line, plus any block
    /// opened on that line.
    fn skip_statement(&mut self, line: usize) -> ParseResult<()> {
        while let Some(lexeme) = self.peek() {
            if lexeme.line != line {
                break;
            }
            let opens = lexeme.token == Token::Open;
            self.next();
            if opens {
                return self.skip_to_close(line);
            }
        }
        Ok(())
    }

    fn skip_block(&mut self, line: usize) -> ParseResult<()> {
        self.expect_open(line)?;
        self.skip_to_close(line)
    }

    /// Consumes tokens up to the `}` matching an already consumed `{`.
    fn skip_to_close(&mut self, line: usize) -> ParseResult<()> {
        let mut depth = 1;
        while depth > 0 {
            match self.require(line, "`}`")?.token {
                Token::Open => depth += 1,
                Token::Close => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    fn expect_open(&mut self, line: usize) -> ParseResult<()> {
        let lexeme = self.require(line, "`{`")?;
        match lexeme.token {
            Token::Open => Ok(()),
            other => Err(ParseError::UnexpectedToken {
                line: lexeme.line,
                expected: "`{`",
                found: other.to_string(),
            }),
        }
    }

    fn text(&mut self, keyword: &str, line: usize) -> ParseResult<String> {
        match self.peek().map(|l| &l.token) {
            Some(Token::Word(_) | Token::Str(_)) => {}
            _ => {
                return Err(ParseError::MissingArgument {
                    line,
                    keyword: keyword.to_string(),
                });
            }
        }
        let lexeme = self.require(line, "an argument")?;
        Ok(lexeme.token.text().unwrap_or_default().to_string())
    }

    fn time(&mut self, keyword: &str, line: usize) -> ParseResult<u32> {
        match self.optional_time(line)? {
            Some(frames) => Ok(frames),
            None => Err(ParseError::MissingArgument {
                line,
                keyword: keyword.to_string(),
            }),
        }
    }

    /// A `mm:ss:ff` time or a bare sample count, if one comes next.
    fn optional_time(&mut self, line: usize) -> ParseResult<Option<u32>> {
        let word = match self.peek() {
            Some(Lexeme {
                token: Token::Word(w),
                line: word_line,
            }) if is_time(w) && *word_line == line => w.clone(),
            _ => return Ok(None),
        };
        self.next();

        if word.contains(':') {
            return parse_frames(&word).map(Some).map_err(ParseError::time(line));
        }

        let invalid = || ParseError::InvalidNumber {
            line,
            value: word.clone(),
        };
        let samples = word.parse::<u32>().map_err(|_| invalid())?;
        if samples % SAMPLES_PER_FRAME != 0 {
            return Err(invalid());
        }
        Ok(Some(samples / SAMPLES_PER_FRAME))
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

    fn peek(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.pos)
    }

    fn next(&mut self) -> Option<Lexeme> {
        let lexeme = self.lexemes.get(self.pos).cloned();
        if lexeme.is_some() {
            self.pos += 1;
        }
        lexeme
    }

    fn require(&mut self, line: usize, expected: &'static str) -> ParseResult<Lexeme> {
        self.next().ok_or_else(|| ParseError::UnexpectedEof {
            line: self.last_line().max(line),
            expected,
        })
    }

    fn last_line(&self) -> usize {
        self.lexemes.last().map_or(0, |l| l.line)
    }
}

fn is_time(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit() || c == ':')
}
