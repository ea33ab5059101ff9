//! Error types shared by the generation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the core. There is no partial-success mode: any of
/// these aborts generation before anything is written.
#[derive(Debug, Error)]
pub enum ObfuscateError {
    /// A source could not be read, or the output could not be written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A YAML document did not have the expected shape
    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// The YAML was well-formed but describes an unusable column mapping
    #[error("invalid column mapping in {origin}: {reason}")]
    InvalidMapping { origin: String, reason: String },

    #[error("dialect '{0}' does not exist. Use: postgresql")]
    Dialect(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("operation cancelled by user: {} was not overwritten", .0.display())]
    UserCancelled(PathBuf),
}

impl ObfuscateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ObfuscateError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(origin: impl Into<String>, source: serde_yaml_ng::Error) -> Self {
        ObfuscateError::Parse {
            origin: origin.into(),
            source,
        }
    }

    /// True for errors caused by a malformed document rather than I/O
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ObfuscateError::Parse { .. } | ObfuscateError::InvalidMapping { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ObfuscateError>;
