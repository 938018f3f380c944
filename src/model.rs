//! Output record model.
//!
//! Field order here is the field order of the emitted JSON. Optional fields
//! are omitted when absent; the two localized blocks are always written.

use serde::{Deserialize, Serialize};

use crate::syntax::{InfoField, Locale};

/// One catalog entry, keyed by its record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: u32,
    /// Caller-supplied tag, identical for every record of a run.
    pub category: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_alias: Option<String>,
    #[serde(default)]
    pub primary: SongInfo,
    #[serde(default)]
    pub secondary: SongInfo,
    /// Present only when at least one performer was committed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performers: Option<Vec<Performer>>,
}

impl Song {
    pub fn new(id: u32, category: i32) -> Self {
        Self {
            id,
            category,
            bpm: None,
            release_date: None,
            reading_alias: None,
            primary: SongInfo::default(),
            secondary: SongInfo::default(),
            performers: None,
        }
    }

    pub fn info_mut(&mut self, locale: Locale) -> &mut SongInfo {
        match locale {
            Locale::Primary => &mut self.primary,
            Locale::Secondary => &mut self.secondary,
        }
    }
}

/// Credits and title in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arranger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub illustrator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyricist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composer: Option<String>,
}

impl SongInfo {
    pub fn slot_mut(&mut self, field: InfoField) -> &mut Option<String> {
        match field {
            InfoField::DisplayName => &mut self.display_name,
            InfoField::Arranger => &mut self.arranger,
            InfoField::Illustrator => &mut self.illustrator,
            InfoField::Lyricist => &mut self.lyricist,
            InfoField::Composer => &mut self.composer,
        }
    }
}

/// A committed performer: both character and role are always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performer {
    pub character: String,
    pub role: String,
}
