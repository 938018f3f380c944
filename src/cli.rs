//! The pvdb2json command-line interface.
//!
//! Parses arguments, runs one conversion and reports the outcome. Exit code
//! is 0 on success and 1 when the conversion fails; argument errors exit
//! through clap.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    diagnostics::print_error,
    engine::{ConversionPipeline, ConvertOptions},
};

pub mod args;
pub mod output;

pub use args::PvdbArgs;
use output::{print_confirmation, StdoutSink};

/// The main entry point for the CLI.
pub fn run() {
    init_tracing();
    let args = PvdbArgs::parse();

    let pipeline = ConversionPipeline::new(ConvertOptions {
        category: args.category,
    });
    match pipeline.convert_file(&args.input, &mut StdoutSink) {
        Ok(output) => print_confirmation(&output),
        Err(e) => {
            print_error(e);
            process::exit(1);
        }
    }
}

/// Logs to stderr, `warn` and above unless `RUST_LOG` says otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
