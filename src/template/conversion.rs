use crate::template::error::{TemplateError, TemplateResult};
use std::iter::Peekable;
use std::str::CharIndices;

/// A value fetched for a conversion, already coerced to the type the field
/// letter demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    /// `%s`-class; `None` is an unset field and renders empty.
    Str(Option<&'a str>),
    /// `%d`-class.
    Int(i64),
    /// `%c`-class, used for letters that name no field.
    Char(char),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Conversion {
    pub left: bool,
    pub plus: bool,
    pub space: bool,
    pub zero: bool,
    pub alternate: bool,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub letter: char,
}

impl Conversion {
    /// Reads flags, width, precision and the field letter following a `%`
    /// at byte `offset`.
    pub fn parse(chars: &mut Peekable<CharIndices>, offset: usize) -> TemplateResult<Self> {
        let mut conversion = Conversion::default();

        while let Some(&(_, c)) = chars.peek() {
            match c {
                '-' => conversion.left = true,
                '+' => conversion.plus = true,
                ' ' => conversion.space = true,
                '0' => conversion.zero = true,
                '#' => conversion.alternate = true,
                _ => break,
            }
            chars.next();
        }

        conversion.width = digits(chars, offset)?;
        if chars.next_if(|&(_, c)| c == '.').is_some() {
            // a bare '.' means precision zero
            conversion.precision = Some(digits(chars, offset)?.unwrap_or(0));
        }

        let (_, letter) = chars
            .next()
            .ok_or(TemplateError::UnterminatedConversion { offset })?;
        conversion.letter = letter;

        Ok(conversion)
    }

    pub fn format(&self, value: Value) -> String {
        match value {
            Value::Str(text) => {
                let text = text.unwrap_or_default();
                let text = match self.precision {
                    Some(precision) => text.chars().take(precision).collect(),
                    None => text.to_string(),
                };
                self.pad(String::new(), text, false)
            }
            Value::Int(number) => self.format_int(number),
            Value::Char(c) => self.pad(String::new(), c.to_string(), false),
        }
    }

    fn format_int(&self, number: i64) -> String {
        let sign = if number < 0 {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        };

        let mut digits = match (self.precision, number) {
            (Some(0), 0) => String::new(),
            _ => number.unsigned_abs().to_string(),
        };
        if let Some(precision) = self.precision {
            let missing = precision.saturating_sub(digits.len());
            digits.insert_str(0, &"0".repeat(missing));
        }

        let zero_fill = self.zero && self.precision.is_none();
        self.pad(sign.to_string(), digits, zero_fill)
    }

    /// Pads `prefix + body` to the field width. Zero fill goes between the
    /// prefix and the body; it never applies to left-justified output.
    fn pad(&self, prefix: String, body: String, zero_fill: bool) -> String {
        let len = prefix.chars().count() + body.chars().count();
        let fill = self.width.unwrap_or(0).saturating_sub(len);

        if self.left {
            format!("{prefix}{body}{}", " ".repeat(fill))
        } else if zero_fill {
            format!("{prefix}{}{body}", "0".repeat(fill))
        } else {
            format!("{}{prefix}{body}", " ".repeat(fill))
        }
    }
}

/// Widths and precisions past the C `int` range are refused.
const MAX_FIELD: usize = i32::MAX as usize;

fn digits(chars: &mut Peekable<CharIndices>, offset: usize) -> TemplateResult<Option<usize>> {
    let mut value: Option<usize> = None;

    while let Some((_, c)) = chars.next_if(|&(_, c)| c.is_ascii_digit()) {
        let digit = c.to_digit(10).unwrap_or(0) as usize;
        value = value
            .unwrap_or(0)
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit))
            .filter(|&v| v <= MAX_FIELD)
            .map(Some)
            .ok_or(TemplateError::FieldTooWide { offset })?;
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversion(spec: &str) -> Conversion {
        let mut chars = spec.char_indices().peekable();
        Conversion::parse(&mut chars, 0).unwrap()
    }

    fn fmt(spec: &str, value: Value) -> String {
        conversion(spec).format(value)
    }

    #[test]
    fn parses_flags_width_and_precision() {
        assert_eq!(
            conversion("-+ 0#12.5s"),
            Conversion {
                left: true,
                plus: true,
                space: true,
                zero: true,
                alternate: true,
                width: Some(12),
                precision: Some(5),
                letter: 's',
            }
        );
        assert_eq!(conversion(".d").precision, Some(0));
        assert_eq!(conversion("010d").width, Some(10));
    }

    #[test]
    fn end_of_input_is_unterminated() {
        let mut chars = "-05.".char_indices().peekable();
        assert_eq!(
            Conversion::parse(&mut chars, 7),
            Err(TemplateError::UnterminatedConversion { offset: 7 })
        );
    }

    #[test]
    fn huge_width_is_rejected() {
        for spec in ["99999999999999999999999s", "99999999999999q", "2147483648q", ".2147483648s"] {
            let mut chars = spec.char_indices().peekable();
            assert_eq!(
                Conversion::parse(&mut chars, 3),
                Err(TemplateError::FieldTooWide { offset: 3 })
            );
        }

        assert_eq!(conversion("2147483647q").width, Some(2_147_483_647));
    }

    #[test]
    fn formats_strings_like_printf() {
        assert_eq!(fmt("5s", Value::Str(Some("ab"))), "   ab");
        assert_eq!(fmt("-5s", Value::Str(Some("ab"))), "ab   ");
        assert_eq!(fmt(".2s", Value::Str(Some("Album"))), "Al");
        assert_eq!(fmt("6.3s", Value::Str(Some("Album"))), "   Alb");
        assert_eq!(fmt("07s", Value::Str(Some("Album"))), "  Album");
        assert_eq!(fmt(".1s", Value::Str(Some("Été"))), "É");
        assert_eq!(fmt("3s", Value::Str(None)), "   ");
        assert_eq!(fmt("s", Value::Str(None)), "");
    }

    #[test]
    fn formats_integers_like_printf() {
        assert_eq!(fmt("d", Value::Int(7)), "7");
        assert_eq!(fmt("05d", Value::Int(7)), "00007");
        assert_eq!(fmt("-5d", Value::Int(7)), "7    ");
        assert_eq!(fmt("-05d", Value::Int(7)), "7    ");
        assert_eq!(fmt("+d", Value::Int(7)), "+7");
        assert_eq!(fmt(" d", Value::Int(7)), " 7");
        assert_eq!(fmt("+ d", Value::Int(7)), "+7");
        assert_eq!(fmt("05d", Value::Int(-7)), "-0007");
        assert_eq!(fmt(".3d", Value::Int(7)), "007");
        assert_eq!(fmt("8.3d", Value::Int(7)), "     007");
        assert_eq!(fmt("08.3d", Value::Int(7)), "     007");
        assert_eq!(fmt(".0d", Value::Int(0)), "");
        assert_eq!(fmt("#d", Value::Int(12)), "12");
    }

    #[test]
    fn formats_literal_characters() {
        assert_eq!(fmt("q", Value::Char('q')), "q");
        assert_eq!(fmt("3q", Value::Char('q')), "  q");
        assert_eq!(fmt("-3q", Value::Char('q')), "q  ");
    }
}
