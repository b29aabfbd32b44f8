//! Compilation errors and the JSON report printed for them.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

/// Status for errors raised by the Sass engine itself (syntax, evaluation).
pub const STATUS_SASS_ERROR: i32 = 1;

/// Status for failures reading or decoding source files.
pub const STATUS_IO_ERROR: i32 = 3;

/// Status for anything else.
pub const STATUS_UNKNOWN_ERROR: i32 = 5;

/// Where in the sources an error was reported. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

/// Errors that can occur while compiling a file.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The engine rejected the stylesheet.
    #[error("{message}")]
    Sass {
        message: String,
        /// Human-oriented rendering, usually with a source excerpt.
        formatted: String,
        location: Option<SourceLocation>,
    },

    /// A source file could not be read. grass shares its I/O errors, hence
    /// the `Arc`.
    #[error("File to read not found or unreadable: {path}")]
    Read {
        path: String,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A source file was not valid UTF-8.
    #[error("Invalid UTF-8: {0}")]
    Encoding(String),

    /// Any other engine failure.
    #[error("{0}")]
    Other(String),
}

impl CompileError {
    /// Numeric status relayed as the process exit code.
    pub fn status(&self) -> i32 {
        match self {
            CompileError::Sass { .. } => STATUS_SASS_ERROR,
            CompileError::Read { .. } | CompileError::Encoding(_) => STATUS_IO_ERROR,
            CompileError::Other(_) => STATUS_UNKNOWN_ERROR,
        }
    }

    /// Build the JSON error report for this error.
    pub fn report(&self) -> ErrorReport {
        let message = self.to_string();
        let (location, formatted) = match self {
            CompileError::Sass {
                formatted,
                location,
                ..
            } => (location.as_ref(), formatted.clone()),
            _ => (None, format!("Error: {message}\n")),
        };

        ErrorReport {
            status: self.status(),
            file: location.map(|l| l.file.clone()),
            line: location.map(|l| l.line),
            column: location.map(|l| l.column),
            message,
            formatted,
        }
    }

    /// Convert a grass failure. `input_path` names the file for read errors,
    /// since grass does not carry the path on its I/O errors.
    pub(crate) fn from_grass(err: Box<grass::Error>, input_path: &Path) -> Self {
        let formatted = err.to_string();

        match err.kind() {
            grass::ErrorKind::ParseError { message, loc, .. } => CompileError::Sass {
                message,
                formatted,
                location: Some(SourceLocation {
                    file: loc.file.name().to_string(),
                    line: loc.begin.line + 1,
                    column: loc.begin.column + 1,
                }),
            },
            grass::ErrorKind::IoError(source) => CompileError::Read {
                path: input_path.to_string_lossy().into_owned(),
                source,
            },
            grass::ErrorKind::FromUtf8Error(message) => CompileError::Encoding(message),
            #[allow(unreachable_patterns)]
            _ => CompileError::Other(formatted),
        }
    }
}

/// JSON error report, shaped like libsass' `error_json`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub status: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    pub message: String,
    pub formatted: String,
}

impl ErrorReport {
    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            // Only string and integer fields; serialization cannot fail in practice.
            tracing::error!(error = %e, "failed to serialize error report");
            format!("{{\"status\": {}}}", self.status)
        })
    }
}
