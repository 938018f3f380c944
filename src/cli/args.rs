//! Defines the command-line arguments for the pvdb2json CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use std::path::{Path, PathBuf};

use clap::Parser;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(name = "pvdb2json", version, about = "pv_db to json converter.")]
pub struct PvdbArgs {
    /// The pv_db.txt file to be converted to json.
    #[arg(short, long, value_name = "FILE", value_parser = existing_file)]
    pub input: PathBuf,

    /// The identifier type of converted entries.
    #[arg(
        short = 't',
        long = "type",
        value_name = "INT",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub category: i32,
}

fn existing_file(raw: &str) -> Result<PathBuf, String> {
    let path = Path::new(raw);
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err("File does not exist.".to_string())
    }
}
