//! Error types for the resolution pipeline and selection.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for locrun operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, resolving or selecting commands.
///
/// Every variant except [`Error::SelectionCanceled`] aborts the current
/// operation. A canceled selection is an expected outcome and callers should
/// check [`Error::is_canceled`] before reporting it as a failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or decoded.
    #[error("Failed to load config {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// A location pattern uses an unsupported wildcard shape.
    #[error("Invalid glob pattern {pattern:?}: {reason}")]
    GlobPattern { pattern: String, reason: &'static str },

    /// A location references a parser type that is not registered.
    #[error("Location {location} has unknown parser type '{name}'")]
    ParserNotFound { location: String, name: String },

    /// Command extraction failed for a directory.
    #[error("Failed to extract commands with parser '{parser}' in {directory}")]
    Extraction {
        parser: String,
        directory: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No configuration file was found walking up to the filesystem root.
    #[error(
        "No {file_name} found in {start} or any parent directory. \
         Create one with a `locations:` list, or pass --config <FILE>"
    )]
    Discovery { file_name: &'static str, start: PathBuf },

    /// A raw selection line did not match either display format.
    #[error("Invalid selection format {0:?}: expected '[name] command' or 'name: command'")]
    SelectionParse(String),

    /// A selection named a location that is not in the configuration.
    #[error("Location not found: {0:?}")]
    LocationNotFound(String),

    /// The user declined to pick a command.
    #[error("Selection canceled")]
    SelectionCanceled,

    /// The external picker process failed.
    #[error("Picker '{program}' failed: {message}")]
    Picker { program: String, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error is the user declining a selection.
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::SelectionCanceled)
    }

    pub(crate) fn extraction(
        parser: &str,
        directory: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Extraction {
            parser: parser.to_string(),
            directory: directory.into(),
            source: source.into(),
        }
    }
}
