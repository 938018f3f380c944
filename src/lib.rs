pub use crate::diagnostics::{ErrorContext, ErrorType, PvdbError};
pub use crate::engine::{ConversionPipeline, ConvertOptions, ProgressSink};
pub use crate::model::{Performer, Song, SongInfo};

pub mod accumulator;
pub mod cli;
pub mod diagnostics;
pub mod engine;
pub mod model;
pub mod syntax;
