//! Diagnostics for the pv_db converter.
//!
//! Every failure the converter can surface is a [`PvdbError`]. Errors are
//! `miette` diagnostics: they carry the offending source text, a span inside
//! it and an optional help line, so the CLI can render them with context.
//!
//! Only fatal conditions are errors. Lenient-parsing anomalies (bad numbers,
//! unknown fields, orphan role lines, duplicate characters) are absorbed by
//! the accumulator and never reach this module.
//!
//! # Construction
//!
//! - `err_msg!(Io, "cannot open {}", path)` for message-only errors.
//! - `err_ctx!(MalformedIdentifier, message, src, span, help)` when the
//!   source line and span are known.
//!
//! Attach an underlying error with [`PvdbError::with_cause`].

use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::syntax::Span;

pub type SourceArc = Arc<NamedSource<String>>;

/// Type-safe classification of [`PvdbError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// A record prefix whose numeric suffix cannot be parsed.
    MalformedIdentifier,
    /// Reading the input or writing the output failed.
    Io,
    /// The record sequence could not be rendered as JSON.
    Serialize,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::MalformedIdentifier => "MalformedIdentifier",
            ErrorType::Io => "Io",
            ErrorType::Serialize => "Serialize",
        }
    }

    /// Diagnostic code shown by `miette`, e.g. `pvdb2json::parse::malformed_identifier`.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorType::MalformedIdentifier => "pvdb2json::parse::malformed_identifier",
            ErrorType::Io => "pvdb2json::io",
            ErrorType::Serialize => "pvdb2json::output::serialize",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Source, span and help attached to an error.
#[derive(Debug, Default)]
pub struct ErrorContext {
    pub source: Option<SourceArc>,
    pub span: Option<Span>,
    pub help: Option<String>,
}

impl ErrorContext {
    /// Returns an empty error context (no source, span, or help).
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a context with both source and span.
    pub fn with_source_and_span(source: SourceArc, span: Span) -> Self {
        Self {
            source: Some(source),
            span: Some(span),
            help: None,
        }
    }

    /// Creates a context with source, span, and help message.
    pub fn with_all(source: SourceArc, span: Span, help: String) -> Self {
        Self {
            source: Some(source),
            span: Some(span),
            help: Some(help),
        }
    }
}

/// Unified error type for every fatal converter failure.
#[derive(Debug, Error)]
pub enum PvdbError {
    #[error("Malformed identifier: {message}")]
    MalformedIdentifier {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    #[error("I/O error: {message}")]
    Io {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    #[error("Serialization error: {message}")]
    Serialize {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl PvdbError {
    fn get_ctx(&self) -> &ErrorContext {
        match self {
            PvdbError::MalformedIdentifier { ctx, .. } => ctx,
            PvdbError::Io { ctx, .. } => ctx,
            PvdbError::Serialize { ctx, .. } => ctx,
        }
    }

    fn message(&self) -> &str {
        match self {
            PvdbError::MalformedIdentifier { message, .. }
            | PvdbError::Io { message, .. }
            | PvdbError::Serialize { message, .. } => message,
        }
    }

    /// Returns the classification of this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            PvdbError::MalformedIdentifier { .. } => ErrorType::MalformedIdentifier,
            PvdbError::Io { .. } => ErrorType::Io,
            PvdbError::Serialize { .. } => ErrorType::Serialize,
        }
    }

    /// Records the underlying error that caused this one.
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let slot = match &mut self {
            PvdbError::MalformedIdentifier { source, .. }
            | PvdbError::Io { source, .. }
            | PvdbError::Serialize { source, .. } => source,
        };
        *slot = Some(Box::new(cause));
        self
    }
}

impl Diagnostic for PvdbError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(self.error_type().code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.get_ctx()
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.get_ctx()
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.get_ctx().span?;
        // Zero-width spans still get a one-column caret.
        let len = span.len().max(1);
        let label = LabeledSpan::new(Some(self.message().to_string()), span.start, len);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Wraps a source text in a named source for error contexts.
pub fn to_error_source<S: AsRef<str>>(name: impl Into<String>, source: S) -> SourceArc {
    Arc::new(NamedSource::new(name.into(), source.as_ref().to_string()))
}

/// Prints a [`PvdbError`] with full miette diagnostics to stderr.
pub fn print_error(error: PvdbError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}

/// Constructs a [`PvdbError`] variant with a formatted message and no context.
#[macro_export]
macro_rules! err_msg {
    ($variant:ident, $($fmt:tt)+) => {
        $crate::PvdbError::$variant {
            message: format!($($fmt)+),
            ctx: $crate::ErrorContext::none(),
            source: None,
        }
    };
}

/// Constructs a [`PvdbError`] variant with a message, source and span, and optional help.
#[macro_export]
macro_rules! err_ctx {
    ($variant:ident, $msg:expr, $src:expr, $span:expr, $help:expr) => {
        $crate::PvdbError::$variant {
            message: $msg.to_string(),
            ctx: $crate::ErrorContext::with_all(
                $crate::diagnostics::SourceArc::clone($src),
                $span,
                format!("{}", $help),
            ),
            source: None,
        }
    };
    ($variant:ident, $msg:expr, $src:expr, $span:expr) => {
        $crate::PvdbError::$variant {
            message: $msg.to_string(),
            ctx: $crate::ErrorContext::with_source_and_span(
                $crate::diagnostics::SourceArc::clone($src),
                $span,
            ),
            source: None,
        }
    };
}
