//! Field dispatch table: maps a field path to the slot it updates.

use super::FIELD_SEPARATOR;

/// Which localized block a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    /// Source-language text (`song_name`, `songinfo.*`).
    Primary,
    /// Translated text (`song_name_en`, `songinfo_en.*`).
    Secondary,
}

/// A text slot inside a localized block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoField {
    DisplayName,
    Arranger,
    Illustrator,
    Lyricist,
    Composer,
}

/// The two lines that make up a performer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformerPart {
    /// `performer.<n>.chara`
    Character,
    /// `performer.<n>.type`
    Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Bpm,
    ReleaseDate,
    ReadingAlias,
    Info(Locale, InfoField),
    Performer(PerformerPart),
    /// Anything not in the table. Ignored by the accumulator.
    Unrecognized,
}

impl Field {
    /// Looks up a field path.
    pub fn parse(path: &str) -> Self {
        use InfoField::*;
        use Locale::*;

        match path {
            "bpm" => Field::Bpm,
            "date" => Field::ReleaseDate,
            "song_name_reading" => Field::ReadingAlias,

            "song_name" => Field::Info(Primary, DisplayName),
            "songinfo.arranger" => Field::Info(Primary, Arranger),
            "songinfo.illustrator" => Field::Info(Primary, Illustrator),
            "songinfo.lyrics" => Field::Info(Primary, Lyricist),
            "songinfo.music" => Field::Info(Primary, Composer),

            "song_name_en" => Field::Info(Secondary, DisplayName),
            "songinfo_en.arranger" => Field::Info(Secondary, Arranger),
            "songinfo_en.illustrator" => Field::Info(Secondary, Illustrator),
            "songinfo_en.lyrics" => Field::Info(Secondary, Lyricist),
            "songinfo_en.music" => Field::Info(Secondary, Composer),

            _ => parse_performer(path).map_or(Field::Unrecognized, Field::Performer),
        }
    }
}

/// `performer.<segments>.chara|type`, with at least one non-empty middle segment.
fn parse_performer(path: &str) -> Option<PerformerPart> {
    let segments: Vec<&str> = path.split(FIELD_SEPARATOR).collect();
    let (head, rest) = segments.split_first()?;
    let (last, middle) = rest.split_last()?;
    if *head != "performer" || middle.iter().all(|segment| segment.is_empty()) {
        return None;
    }
    match *last {
        "chara" => Some(PerformerPart::Character),
        "type" => Some(PerformerPart::Role),
        _ => None,
    }
}
