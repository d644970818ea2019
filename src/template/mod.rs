use crate::disc::Cd;
use crate::template::conversion::Conversion;

pub mod conversion;
pub mod error;
pub mod fields;

pub use error::{TemplateError, TemplateResult};

pub const DISC_TEMPLATE: &str = "Disc Information\n\
arranger:\t%A\n\
composer:\t%C\n\
genre:\t\t%G\n\
message:\t%M\n\
no. of tracks:\t%N\n\
performer:\t%P\n\
songwriter:\t%S\n\
title:\t\t%T\n\
UPC/EAN:\t%U\n";

pub const TRACK_TEMPLATE: &str = "\n\
Track %n Information\n\
arranger:\t%a\n\
composer:\t%c\n\
genre:\t\t%g\n\
ISRC:\t\t%i\n\
message:\t%m\n\
track number:\t%n\n\
performer:\t%p\n\
title:\t\t%t\n\
ISRC (CD-TEXT):\t%u\n";

/// The disc and track templates used for a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub disc: String,
    pub track: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            disc: DISC_TEMPLATE.to_string(),
            track: TRACK_TEMPLATE.to_string(),
        }
    }
}

/// Which part of a disc a report covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    /// The disc template, then the track template for every track.
    #[default]
    All,
    Disc,
    /// The track template for one track (1-based).
    Track(usize),
}

/// Resolves backslash escapes. Unknown escapes stand for the escaped
/// character; a trailing lone backslash is kept.
pub fn translate_escapes(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('a') => out.push('\x07'),
            Some('b') => out.push('\x08'),
            Some('f') => out.push('\x0c'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('v') => out.push('\x0b'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

/// Renders `template` for the disc (`track_number == 0`) or for one of its
/// tracks.
pub fn render(template: &str, cd: &Cd, track_number: usize) -> TemplateResult<String> {
    let track = match track_number {
        0 => None,
        n => Some(cd.track(n)?),
    };

    let template = translate_escapes(template);
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let conversion = Conversion::parse(&mut chars, offset)?;
        let value = fields::lookup(cd, track, conversion.letter);
        out.push_str(&conversion.format(value));
    }

    Ok(out)
}

/// Renders the selected part of a disc with the given templates.
pub fn render_report(
    cd: &Cd,
    templates: &Templates,
    selection: Selection,
) -> TemplateResult<String> {
    match selection {
        Selection::All => {
            let mut out = render(&templates.disc, cd, 0)?;
            for number in 1..=cd.track_count() {
                out.push_str(&render(&templates.track, cd, number)?);
            }
            Ok(out)
        }
        Selection::Disc => render(&templates.disc, cd, 0),
        Selection::Track(number) => {
            cd.track(number)?;
            render(&templates.track, cd, number)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::{ModelError, Pti, TrackMode};

    fn disc() -> Cd {
        let mut cd = Cd::new();
        cd.cdtext_mut().set(Pti::Title, "Album");
        cd.cdtext_mut().set(Pti::Performer, "Band");
        for (number, title) in [(1, Some("Opening")), (2, None), (3, Some("Closing"))] {
            let track = cd.add_track(number, TrackMode::Audio).unwrap();
            track.set_index(1, 0).unwrap();
            if let Some(title) = title {
                track.cdtext_mut().set(Pti::Title, title);
            }
        }
        cd.track_mut(1).unwrap().set_isrc("USABC0400001");
        cd
    }

    #[test]
    fn unknown_letters_render_literally() {
        let cd = disc();
        assert_eq!(render("%q", &cd, 0).unwrap(), "q");
        assert_eq!(render("%%", &cd, 0).unwrap(), "%");
        assert_eq!(render("100%% %T", &cd, 0).unwrap(), "100% Album");
    }

    #[test]
    fn unset_field_renders_empty() {
        let cd = disc();
        assert_eq!(render("%t", &cd, 2).unwrap(), "");
        assert_eq!(render("[%-4t]", &cd, 2).unwrap(), "[    ]");
    }

    #[test]
    fn backslash_escapes_are_translated() {
        let cd = disc();
        assert_eq!(render("a\\tb", &cd, 0).unwrap(), "a\tb");
        assert_eq!(render("%T\\n", &cd, 0).unwrap(), "Album\n");
        assert_eq!(translate_escapes("\\a\\b\\f\\r\\v\\0"), "\x07\x08\x0c\r\x0b\0");
        assert_eq!(translate_escapes("\\\"\\\\\\q"), "\"\\q");
        assert_eq!(translate_escapes("end\\"), "end\\");
    }

    #[test]
    fn track_scope_reaches_disc_fields() {
        let cd = disc();
        assert_eq!(render("%n/%N %t by %P", &cd, 1).unwrap(), "1/3 Opening by Band");
        assert_eq!(render("%i", &cd, 1).unwrap(), "USABC0400001");
        assert_eq!(render("%02n. %.3t", &cd, 3).unwrap(), "03. Clo");
    }

    #[test]
    fn track_letters_are_literal_at_disc_scope() {
        let cd = disc();
        assert_eq!(render("%t", &cd, 0).unwrap(), "t");
    }

    #[test]
    fn unterminated_conversion_reports_offset() {
        let cd = disc();
        assert_eq!(
            render("abc %-5", &cd, 0),
            Err(TemplateError::UnterminatedConversion { offset: 4 })
        );
        // offsets are measured after escape translation
        assert_eq!(
            render("\\t%", &cd, 0),
            Err(TemplateError::UnterminatedConversion { offset: 1 })
        );
    }

    #[test]
    fn oversized_width_fails_before_padding() {
        let cd = disc();
        assert_eq!(
            render("x %99999999999999q", &cd, 0),
            Err(TemplateError::FieldTooWide { offset: 2 })
        );
    }

    #[test]
    fn track_out_of_range_is_a_model_error() {
        let cd = disc();
        assert_eq!(
            render("%t", &cd, 4),
            Err(TemplateError::Model(ModelError::TrackOutOfRange {
                number: 4,
                count: 3
            }))
        );
    }

    #[test]
    fn report_selections() {
        let cd = disc();
        let templates = Templates {
            disc: "%T\\n".to_string(),
            track: "%n:%t\\n".to_string(),
        };

        assert_eq!(
            render_report(&cd, &templates, Selection::All).unwrap(),
            "Album\n1:Opening\n2:\n3:Closing\n"
        );
        assert_eq!(
            render_report(&cd, &templates, Selection::Disc).unwrap(),
            "Album\n"
        );
        assert_eq!(
            render_report(&cd, &templates, Selection::Track(3)).unwrap(),
            "3:Closing\n"
        );
        assert!(render_report(&cd, &templates, Selection::Track(0)).is_err());
    }

    #[test]
    fn default_templates_list_every_field() {
        let cd = disc();
        let report = render_report(&cd, &Templates::default(), Selection::Track(1)).unwrap();

        assert!(report.starts_with("\nTrack 1 Information\n"));
        assert!(report.contains("title:\t\tOpening\n"));
        assert!(report.contains("ISRC:\t\tUSABC0400001\n"));
        assert!(report.contains("\nperformer:\t"));

        let report = render_report(&cd, &Templates::default(), Selection::Disc).unwrap();
        assert!(report.contains("no. of tracks:\t3\n"));
        assert!(report.contains("performer:\tBand\n"));
    }
}
