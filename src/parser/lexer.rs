use crate::parser::error::{ParseError, ParseResult};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Str(String),
    Open,
    Close,
}

impl Token {
    /// Text of a word or quoted string.
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::Word(s) | Token::Str(s) => Some(s),
            Token::Open | Token::Close => None,
        }
    }

    pub fn is_word(&self, keyword: &str) -> bool {
        matches!(self, Token::Word(w) if w == keyword)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Word(w) => write!(f, "`{w}`"),
            Token::Str(s) => write!(f, "\"{s}\""),
            Token::Open => f.write_str("`{`"),
            Token::Close => f.write_str("`}`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Quoted strings without escapes, braces are plain characters.
    Cue,
    /// Quoted strings with `\` escapes, `{`/`}` tokens and `//` comments.
    Toc,
}

pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    dialect: Dialect,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, dialect: Dialect, first_line: usize) -> Self {
        Self {
            chars: input.chars().peekable(),
            dialect,
            line: first_line,
        }
    }

    pub fn tokenize(mut self) -> ParseResult<Vec<Lexeme>> {
        let mut lexemes = Vec::new();

        while let Some(&c) = self.chars.peek() {
            let line = self.line;
            match c {
                '\n' => {
                    self.chars.next();
                    self.line += 1;
                }
                c if c.is_whitespace() => {
                    self.chars.next();
                }
                '"' => {
                    self.chars.next();
                    let token = Token::Str(self.quoted()?);
                    lexemes.push(Lexeme { token, line });
                }
                '{' | '}' if self.dialect == Dialect::Toc => {
                    self.chars.next();
                    let token = if c == '{' { Token::Open } else { Token::Close };
                    lexemes.push(Lexeme { token, line });
                }
                '/' if self.dialect == Dialect::Toc && self.at_comment() => {
                    while self.chars.next_if(|&c| c != '\n').is_some() {}
                }
                _ => {
                    let token = Token::Word(self.word());
                    lexemes.push(Lexeme { token, line });
                }
            }
        }

        Ok(lexemes)
    }

    fn at_comment(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.peek() == Some(&'/')
    }

    fn word(&mut self) -> String {
        let dialect = self.dialect;
        let mut word = String::new();
        while let Some(c) = self.chars.next_if(|&c| {
            !c.is_whitespace() && c != '"' && !(dialect == Dialect::Toc && (c == '{' || c == '}'))
        }) {
            word.push(c);
        }
        word
    }

    fn quoted(&mut self) -> ParseResult<String> {
        let line = self.line;
        let mut value = String::new();

        loop {
            match self.chars.next() {
                None | Some('\n') => return Err(ParseError::UnterminatedString { line }),
                Some('"') => return Ok(value),
                Some('\\') if self.dialect == Dialect::Toc => value.push(self.escape(line)?),
                Some(c) => value.push(c),
            }
        }
    }

    fn escape(&mut self, line: usize) -> ParseResult<char> {
        match self.chars.next() {
            None | Some('\n') => Err(ParseError::UnterminatedString { line }),
            Some(d) if d.is_digit(8) => {
                let mut code = d.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.chars.next_if(|c| c.is_digit(8)) {
                        Some(d) => code = code * 8 + d.to_digit(8).unwrap_or(0),
                        None => break,
                    }
                }
                Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
            }
            Some(c) => Ok(c),
        }
    }
}

/// Splits one CUE line into words and quoted strings.
pub fn tokenize_cue_line(line: &str, line_number: usize) -> ParseResult<Vec<Token>> {
    Ok(Lexer::new(line, Dialect::Cue, line_number)
        .tokenize()?
        .into_iter()
        .map(|lexeme| lexeme.token)
        .collect())
}

pub fn tokenize_toc(input: &str) -> ParseResult<Vec<Lexeme>> {
    Lexer::new(input, Dialect::Toc, 1).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Token {
        Token::Word(s.to_string())
    }

    fn string(s: &str) -> Token {
        Token::Str(s.to_string())
    }

    #[test]
    fn cue_line_splits_words_and_strings() {
        let tokens = tokenize_cue_line(r#"FILE "My Album {disc 1}.wav" WAVE"#, 1).unwrap();
        assert_eq!(
            tokens,
            vec![word("FILE"), string("My Album {disc 1}.wav"), word("WAVE")]
        );
    }

    #[test]
    fn cue_strings_have_no_escapes() {
        let tokens = tokenize_cue_line(r#"TITLE "C:\music\""#, 1).unwrap();
        assert_eq!(tokens, vec![word("TITLE"), string(r"C:\music\")]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = tokenize_cue_line(r#"TITLE "oops"#, 7).unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedString { line: 7 }));
    }

    #[test]
    fn toc_tracks_lines_braces_and_comments() {
        let lexemes = tokenize_toc("CD_DA // header\nCD_TEXT {\n  TITLE \"A \\\"B\\\"\"\n}\n").unwrap();
        let summary: Vec<_> = lexemes.iter().map(|l| (l.token.clone(), l.line)).collect();
        assert_eq!(
            summary,
            vec![
                (word("CD_DA"), 1),
                (word("CD_TEXT"), 2),
                (Token::Open, 2),
                (word("TITLE"), 3),
                (string("A \"B\""), 3),
                (Token::Close, 4),
            ]
        );
    }

    #[test]
    fn toc_octal_escapes() {
        let lexemes = tokenize_toc(r#""caf\351""#).unwrap();
        assert_eq!(lexemes[0].token, string("café"));
    }

    #[test]
    fn toc_string_cannot_span_lines() {
        let err = tokenize_toc("TITLE \"one\ntwo\"").unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedString { line: 1 }));
    }
}
