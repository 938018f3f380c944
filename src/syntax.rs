//! Line grammar for pv_db exports.
//!
//! A data line has the shape `pv_<digits>.<field>[.<subfield>]=<value>`.
//! Anything else (comments, blank lines, stray text) is noise and is skipped.
//! This module is purely syntactic: it classifies lines and names fields, the
//! [`accumulator`](crate::accumulator) decides what they mean.

pub mod classifier;
pub mod field;

pub use classifier::{classify, parse_record_id, DataLine, Line};
pub use field::{Field, InfoField, Locale, PerformerPart};

/// Token every data line starts with.
pub const RECORD_MARKER: &str = "pv_";
/// Lines starting with this character are comments.
pub const COMMENT_MARKER: char = '#';
/// Separates the record prefix from the field path, and field path segments.
pub const FIELD_SEPARATOR: char = '.';
/// Separates the key from its value.
pub const VALUE_SEPARATOR: char = '=';
/// UTF-8 byte-order mark, tolerated at the very start of the input.
pub const BYTE_ORDER_MARK: char = '\u{feff}';

/// Byte range within a single input line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
