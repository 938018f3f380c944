//! Handles all user-facing output for the CLI.
//!
//! Progress lines and the final confirmation go to stdout; diagnostics go to
//! stderr through [`print_error`](crate::diagnostics::print_error).

use std::io::Write;
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::engine::ProgressSink;

// ============================================================================
// PROGRESS SINKS
// ============================================================================

/// OutputBuffer: collects output into a String for testing or programmatic capture.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    pub buffer: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl ProgressSink for OutputBuffer {
    fn emit(&mut self, text: &str) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(text);
    }
}

/// StdoutSink: writes output to stdout for CLI use.
pub struct StdoutSink;

impl ProgressSink for StdoutSink {
    fn emit(&mut self, text: &str) {
        println!("{}", text);
    }
}

// ============================================================================
// CONFIRMATION
// ============================================================================

/// Prints `Parsed to '<file>'.`, in green when stdout is a terminal.
pub fn print_confirmation(output: &Path) {
    let mut stdout = StandardStream::stdout(color_choice());
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    let _ = write!(stdout, "Parsed to '{}'.", output.display());
    let _ = stdout.reset();
    let _ = writeln!(stdout);
}

// termcolor's Auto only looks at TERM, so piped output is checked here.
fn color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
