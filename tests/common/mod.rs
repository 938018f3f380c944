//! Shared helpers for the pvdb2json integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use pvdb2json::cli::output::OutputBuffer;
use pvdb2json::{ConversionPipeline, ConvertOptions, PvdbError, Song};

/// Absolute path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Converts `text` with the given category, returning records and progress output.
pub fn convert(text: &str, category: i32) -> Result<(Vec<Song>, String), PvdbError> {
    let mut sink = OutputBuffer::new();
    let songs = ConversionPipeline::new(ConvertOptions { category }).convert_str(text, &mut sink)?;
    Ok((songs, sink.buffer))
}
