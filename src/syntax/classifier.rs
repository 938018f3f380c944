//! Splits raw input lines into skipped noise and data lines.

use crate::diagnostics::{to_error_source, PvdbError};
use crate::err_ctx;

use super::{Span, COMMENT_MARKER, FIELD_SEPARATOR, RECORD_MARKER, VALUE_SEPARATOR};

/// A line that belongs to the record grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLine {
    /// Record identifier, leading zeros stripped.
    pub id: u32,
    /// The raw prefix segment, e.g. `pv_001`.
    pub prefix: String,
    /// Field path after the prefix, e.g. `songinfo.music`.
    pub field: String,
    /// Value with surrounding whitespace trimmed. May contain `=`.
    pub value: String,
    /// 1-based position in the input.
    pub line_number: usize,
}

/// Outcome of classifying one raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Skip,
    Data(DataLine),
}

/// Classifies one raw line.
///
/// Comment lines and lines not starting with [`RECORD_MARKER`] are
/// [`Line::Skip`]. Data lines split at the first `.` and then at the first
/// `=`; a missing `=` yields an empty value and a missing `.` leaves the
/// whole line as the prefix.
///
/// # Errors
///
/// Returns [`PvdbError::MalformedIdentifier`] when the prefix does not end in
/// a record number. `source_name` and `line_number` locate the line in the
/// diagnostic.
pub fn classify(text: &str, line_number: usize, source_name: &str) -> Result<Line, PvdbError> {
    if text.starts_with(COMMENT_MARKER) || !text.starts_with(RECORD_MARKER) {
        return Ok(Line::Skip);
    }

    let (prefix, rest) = text.split_once(FIELD_SEPARATOR).unwrap_or((text, ""));
    let (field, value) = rest.split_once(VALUE_SEPARATOR).unwrap_or((rest, ""));

    let Some(id) = parse_record_id(prefix) else {
        return Err(malformed_identifier(text, prefix, line_number, source_name));
    };

    Ok(Line::Data(DataLine {
        id,
        prefix: prefix.to_string(),
        field: field.to_string(),
        value: value.trim().to_string(),
        line_number,
    }))
}

/// Extracts the record number from a prefix such as `pv_042`.
///
/// The marker, surrounding whitespace and any leading zeros are stripped and
/// the remainder must be a non-empty run of ASCII digits that fits in a
/// `u32`. An all-zero suffix leaves nothing to parse and is rejected.
pub fn parse_record_id(prefix: &str) -> Option<u32> {
    let digits = prefix
        .strip_prefix(RECORD_MARKER)?
        .trim()
        .trim_start_matches('0');
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn malformed_identifier(
    text: &str,
    prefix: &str,
    line_number: usize,
    source_name: &str,
) -> PvdbError {
    let src = to_error_source(source_name, text);
    let span = Span {
        start: RECORD_MARKER.len(),
        end: prefix.len(),
    };
    err_ctx!(
        MalformedIdentifier,
        format!("`{prefix}` on line {line_number} does not end in a record number"),
        &src,
        span,
        format!("record prefixes are `{RECORD_MARKER}` followed by decimal digits, e.g. `{RECORD_MARKER}001`")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorType;

    fn data(text: &str) -> DataLine {
        match classify(text, 1, "test") {
            Ok(Line::Data(line)) => line,
            other => panic!("expected data line for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn comments_and_noise_are_skipped() {
        for text in [
            "# pv_001.song_name=Commented",
            "",
            "stray text",
            " pv_001.song_name=Indented",
            "PV_001.song_name=Upper",
        ] {
            assert_eq!(classify(text, 1, "test").unwrap(), Line::Skip, "{text:?}");
        }
    }

    #[test]
    fn splits_prefix_field_and_trimmed_value() {
        let line = data("pv_012.songinfo.music=  Someone  ");
        assert_eq!(line.id, 12);
        assert_eq!(line.prefix, "pv_012");
        assert_eq!(line.field, "songinfo.music");
        assert_eq!(line.value, "Someone");
    }

    #[test]
    fn value_keeps_later_separators() {
        let line = data("pv_001.song_name=a=b=c");
        assert_eq!(line.field, "song_name");
        assert_eq!(line.value, "a=b=c");
    }

    #[test]
    fn missing_value_separator_gives_empty_value() {
        let line = data("pv_001.song_name");
        assert_eq!(line.field, "song_name");
        assert_eq!(line.value, "");
    }

    #[test]
    fn record_id_strips_leading_zeros() {
        assert_eq!(parse_record_id("pv_001"), Some(1));
        assert_eq!(parse_record_id("pv_100"), Some(100));
        assert_eq!(parse_record_id("pv_7"), Some(7));
    }

    #[test]
    fn record_id_tolerates_surrounding_whitespace() {
        assert_eq!(parse_record_id("pv_001 "), Some(1));
        assert_eq!(parse_record_id("pv_ 42"), Some(42));
        assert_eq!(parse_record_id("pv_ "), None);
        assert_eq!(parse_record_id("pv_1 2"), None);

        let line = data("pv_001 .song_name=X");
        assert_eq!(line.id, 1);
        assert_eq!(line.field, "song_name");
    }

    #[test]
    fn record_id_rejects_non_numeric_suffixes() {
        for prefix in ["pv_abc", "pv_", "pv_000", "pv_1a", "pv_+1", "pv_-1", "pv_99999999999"] {
            assert_eq!(parse_record_id(prefix), None, "{prefix}");
        }
    }

    #[test]
    fn malformed_identifier_is_an_error() {
        let err = classify("pv_abc.song_name=X", 4, "pv_db.txt").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::MalformedIdentifier);
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn diagnostic_names_the_file_once() {
        let err = classify("pv_abc.song_name=X", 4, "pv_db.txt").unwrap_err();
        let report = format!("{:?}", miette::Report::new(err));
        assert!(report.contains("pv_db.txt"));
        assert!(!report.contains("pv_db.txt:4"));
        assert!(report.contains("on line 4"));
    }

    #[test]
    fn line_without_field_separator_is_judged_by_its_prefix() {
        let err = classify("pv_001=X", 1, "test").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::MalformedIdentifier);

        let line = data("pv_001");
        assert_eq!(line.id, 1);
        assert_eq!(line.field, "");
    }
}
