use std::collections::BTreeMap;
use std::fmt::Display;

/// CD-TEXT pack types kept by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pti {
    Title,
    Performer,
    Songwriter,
    Composer,
    Arranger,
    Message,
    Genre,
    UpcIsrc,
}

impl Pti {
    pub const ALL: [Pti; 8] = [
        Pti::Title,
        Pti::Performer,
        Pti::Songwriter,
        Pti::Composer,
        Pti::Arranger,
        Pti::Message,
        Pti::Genre,
        Pti::UpcIsrc,
    ];

    /// Keyword shared by both text formats. UPC/ISRC is spelled
    /// `UPC_EAN` at disc scope and `ISRC` inside a TOC track block.
    pub fn keyword(&self) -> &'static str {
        match self {
            Pti::Title => "TITLE",
            Pti::Performer => "PERFORMER",
            Pti::Songwriter => "SONGWRITER",
            Pti::Composer => "COMPOSER",
            Pti::Arranger => "ARRANGER",
            Pti::Message => "MESSAGE",
            Pti::Genre => "GENRE",
            Pti::UpcIsrc => "UPC_EAN",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Pti> {
        let pti = match keyword.to_ascii_uppercase().as_str() {
            "TITLE" => Pti::Title,
            "PERFORMER" => Pti::Performer,
            "SONGWRITER" => Pti::Songwriter,
            "COMPOSER" => Pti::Composer,
            "ARRANGER" => Pti::Arranger,
            "MESSAGE" => Pti::Message,
            "GENRE" => Pti::Genre,
            "UPC_EAN" => Pti::UpcIsrc,
            _ => return None,
        };

        Some(pti)
    }
}

impl Display for Pti {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Flat CD-TEXT block. An unset field is absent from the map, which is
/// not the same thing as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cdtext {
    fields: BTreeMap<Pti, String>,
}

impl Cdtext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pti: Pti) -> Option<&str> {
        self.fields.get(&pti).map(String::as_str)
    }

    pub fn set(&mut self, pti: Pti, value: impl Into<String>) {
        self.fields.insert(pti, value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Set fields in pack-type order.
    pub fn iter(&self) -> impl Iterator<Item = (Pti, &str)> {
        self.fields.iter().map(|(pti, value)| (*pti, value.as_str()))
    }
}
