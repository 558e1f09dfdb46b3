//! Error types for the drop pipeline.
//!
//! Fatal conditions only. Recoverable model-row problems are reported as
//! [`crate::input::model::RowWarning`] values instead.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for a drop run.
#[derive(Debug, Error)]
pub enum DropError {
    /// Orientation table violates a format or range constraint; the whole batch is rejected.
    #[error("Invalid drop orientations (line {line}): {reason}")]
    InputFormat { line: usize, reason: String },

    /// A required file or input is absent or empty.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// No confirmed drop height and no fallback value.
    #[error("Drop height unresolved: {0}")]
    ConfigurationAmbiguity(String),

    /// Run configuration file is malformed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DropError {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        DropError::InputFormat {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DropError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for `Result<T, DropError>`.
pub type Result<T> = std::result::Result<T, DropError>;
