//! Conversion pipeline: line source → classifier → accumulator → JSON file.
//!
//! The pipeline owns the input for the duration of one conversion and reads
//! it strictly line by line. Records are buffered in memory; the JSON output
//! is rendered and written only after the whole input parsed cleanly, so a
//! fatal error never leaves a partial file behind.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    accumulator::{RecordAccumulator, Transition},
    diagnostics::PvdbError,
    err_msg,
    model::Song,
    syntax::{classify, Line, BYTE_ORDER_MARK},
};

// ============================================================================
// PIPELINE
// ============================================================================

/// Receives user-facing progress lines.
pub trait ProgressSink {
    fn emit(&mut self, text: &str);
}

/// Per-run settings supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Tag applied to every record of the run.
    pub category: i32,
}

/// Drives one pv_db conversion.
#[derive(Debug, Clone, Default)]
pub struct ConversionPipeline {
    options: ConvertOptions,
}

impl ConversionPipeline {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ConvertOptions {
        self.options
    }

    /// Folds every line of `reader` into records.
    ///
    /// Emits `Parsing <prefix>...` to `sink` whenever a new record starts.
    /// Invalid UTF-8 is replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed identifier or read error. No records are
    /// returned in that case.
    pub fn convert_reader<R: BufRead>(
        &self,
        mut reader: R,
        source_name: &str,
        sink: &mut dyn ProgressSink,
    ) -> Result<Vec<Song>, PvdbError> {
        let mut accumulator = RecordAccumulator::new(self.options.category);
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).map_err(|e| {
                err_msg!(Io, "failed reading {} after line {}", source_name, line_number)
                    .with_cause(e)
            })?;
            if read == 0 {
                break;
            }

            let decoded = String::from_utf8_lossy(&buf);
            let mut chunk: &str = &decoded;
            chunk = chunk.strip_suffix('\n').unwrap_or(chunk);
            chunk = chunk.strip_suffix('\r').unwrap_or(chunk);

            // A lone `\r` also ends a line.
            for mut text in chunk.split('\r') {
                line_number += 1;
                if line_number == 1 {
                    text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
                }

                let Line::Data(line) = classify(text, line_number, source_name)? else {
                    continue;
                };
                if let Transition::Started { prefix, .. } = accumulator.push(&line) {
                    sink.emit(&format!("Parsing {prefix}..."));
                }
            }
        }

        let songs = accumulator.finish();
        debug!(source = source_name, lines = line_number, records = songs.len(), "input consumed");
        Ok(songs)
    }

    /// Converts in-memory text.
    pub fn convert_str(&self, text: &str, sink: &mut dyn ProgressSink) -> Result<Vec<Song>, PvdbError> {
        self.convert_reader(text.as_bytes(), "<input>", sink)
    }

    /// Converts `input` and writes the result next to the working directory
    /// as `<stem>.json`. Returns the path written.
    pub fn convert_file(&self, input: &Path, sink: &mut dyn ProgressSink) -> Result<PathBuf, PvdbError> {
        let songs = {
            let file = File::open(input).map_err(|e| {
                err_msg!(Io, "cannot open '{}'", input.display()).with_cause(e)
            })?;
            let source_name = input
                .file_name()
                .map_or_else(|| input.display().to_string(), |n| n.to_string_lossy().into_owned());
            self.convert_reader(BufReader::new(file), &source_name, sink)?
        };

        let json = render_json(&songs)?;
        let output = output_path(input);
        fs::write(&output, json).map_err(|e| {
            err_msg!(Io, "cannot write '{}'", output.display()).with_cause(e)
        })?;
        debug!(output = %output.display(), records = songs.len(), "output written");
        Ok(output)
    }
}

// ============================================================================
// OUTPUT RENDERING
// ============================================================================

/// Renders records as a two-space indented JSON array.
///
/// Non-ASCII text is written as raw UTF-8, never as `\u` escapes.
pub fn render_json(songs: &[Song]) -> Result<String, PvdbError> {
    serde_json::to_string_pretty(songs)
        .map_err(|e| err_msg!(Serialize, "cannot render {} records", songs.len()).with_cause(e))
}

/// `<input stem>.json`, relative to the working directory.
///
/// Only the last extension is replaced: `pv_db.v2.txt` becomes `pv_db.v2.json`.
pub fn output_path(input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map_or_else(OsString::new, |stem| stem.to_os_string());
    name.push(".json");
    PathBuf::from(name)
}
