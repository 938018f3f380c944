//! Record accumulator: folds data lines into completed records.
//!
//! The accumulator is a two-state machine. It starts with no active record;
//! the first data line opens one, and every later line either continues it
//! (same identifier) or closes it and opens the next (different identifier).
//! [`RecordAccumulator::finish`] closes whatever is still open.
//!
//! Parsing is lenient. Non-numeric `bpm`/`date` values become `0`, unknown
//! fields are ignored, a role line with no pending performer is ignored and a
//! character line naming an already-committed performer is ignored. None of
//! these produce an error or a warning.
//!
//! Performers are built in two steps. A `chara` line opens a provisional
//! performer; the next `type` line commits it (unless the role is excluded)
//! and clears the slot. A provisional performer still open when its record
//! closes is dropped.

use tracing::{debug, trace};

use crate::model::{Performer, Song};
use crate::syntax::{DataLine, Field, PerformerPart};

/// Roles that drop the performer instead of committing it.
pub const EXCLUDED_PERFORMER_ROLES: [&str; 2] = ["PSEUDO_DEFAULT", "PSEUDO_SAME"];

/// What a pushed line did to the accumulator state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The line opened a new record.
    Started { id: u32, prefix: String },
    /// The line belonged to the active record.
    Continued,
}

// ============================================================================
// ACTIVE RECORD
// ============================================================================

/// The record currently being filled.
#[derive(Debug)]
struct ActiveRecord {
    song: Song,
    performers: Vec<Performer>,
    /// Character name of the performer waiting for its role line.
    provisional: Option<String>,
}

impl ActiveRecord {
    fn new(id: u32, category: i32) -> Self {
        Self {
            song: Song::new(id, category),
            performers: Vec::new(),
            provisional: None,
        }
    }

    fn apply(&mut self, field: Field, value: &str) {
        match field {
            Field::Bpm => self.song.bpm = Some(parse_int_or_zero(value)),
            Field::ReleaseDate => self.song.release_date = Some(parse_int_or_zero(value)),
            Field::ReadingAlias => self.song.reading_alias = Some(value.to_string()),
            Field::Info(locale, slot) => {
                *self.song.info_mut(locale).slot_mut(slot) = Some(value.to_string());
            }
            Field::Performer(PerformerPart::Character) => self.begin_performer(value),
            Field::Performer(PerformerPart::Role) => self.commit_performer(value),
            Field::Unrecognized => {}
        }
    }

    fn begin_performer(&mut self, character: &str) {
        if self.performers.iter().any(|p| p.character == character) {
            trace!(id = self.song.id, character, "character already committed");
            return;
        }
        self.provisional = Some(character.to_string());
    }

    fn commit_performer(&mut self, role: &str) {
        let Some(character) = self.provisional.take() else {
            trace!(id = self.song.id, role, "role line without a pending performer");
            return;
        };
        if is_excluded_role(role) {
            trace!(id = self.song.id, %character, role, "performer dropped for excluded role");
            return;
        }
        self.performers.push(Performer {
            character,
            role: role.to_string(),
        });
    }

    fn into_song(self) -> Song {
        let mut song = self.song;
        if let Some(character) = self.provisional {
            trace!(id = song.id, %character, "provisional performer discarded");
        }
        if !self.performers.is_empty() {
            song.performers = Some(self.performers);
        }
        song
    }
}

// ============================================================================
// ACCUMULATOR
// ============================================================================

/// Streaming fold from [`DataLine`]s to [`Song`]s, in first-seen order.
#[derive(Debug)]
pub struct RecordAccumulator {
    category: i32,
    active: Option<ActiveRecord>,
    completed: Vec<Song>,
}

impl RecordAccumulator {
    /// `category` is stamped on every record this accumulator produces.
    pub fn new(category: i32) -> Self {
        Self {
            category,
            active: None,
            completed: Vec::new(),
        }
    }

    /// Identifier of the record currently being filled, if any.
    pub fn active_id(&self) -> Option<u32> {
        self.active.as_ref().map(|active| active.song.id)
    }

    /// Records closed so far, in order.
    pub fn completed(&self) -> &[Song] {
        &self.completed
    }

    pub fn push(&mut self, line: &DataLine) -> Transition {
        let transition = if self.active_id() == Some(line.id) {
            Transition::Continued
        } else {
            self.close_active();
            self.active = Some(ActiveRecord::new(line.id, self.category));
            Transition::Started {
                id: line.id,
                prefix: line.prefix.clone(),
            }
        };

        if let Some(active) = self.active.as_mut() {
            let field = Field::parse(&line.field);
            if field == Field::Unrecognized {
                trace!(line = line.line_number, field = %line.field, "field ignored");
            }
            active.apply(field, &line.value);
        }

        transition
    }

    /// Closes the active record and returns every record in order.
    pub fn finish(mut self) -> Vec<Song> {
        self.close_active();
        self.completed
    }

    fn close_active(&mut self) {
        if let Some(active) = self.active.take() {
            let song = active.into_song();
            debug!(
                id = song.id,
                performers = song.performers.as_ref().map_or(0, Vec::len),
                "record closed"
            );
            self.completed.push(song);
        }
    }
}

/// Lenient integer parse: optional sign and digits within `i32`, otherwise `0`.
pub fn parse_int_or_zero(value: &str) -> i32 {
    value.parse().unwrap_or_else(|_| {
        trace!(value, "non-numeric value coerced to 0");
        0
    })
}

pub fn is_excluded_role(role: &str) -> bool {
    EXCLUDED_PERFORMER_ROLES.contains(&role)
}
