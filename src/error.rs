//! Error types shared across the engine.
//!
//! Per-file failures are values, not aborts: batch operations collect them
//! into their reports so one bad file never hides the rest.

use std::path::PathBuf;

use thiserror::Error;

/// Why a canonical path could not be built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A directory segment or the filename rendered as an empty string.
    #[error("cannot build canonical path: {0} is empty")]
    MissingSegment(&'static str),
}

#[derive(Error, Debug)]
pub enum Error {
    /// Title or track number could not be resolved by any automatic tier.
    #[error("ambiguous metadata for {}: unresolved {}", path.display(), missing.join(", "))]
    AmbiguousMetadata {
        path: PathBuf,
        missing: Vec<&'static str>,
    },

    /// The rename target already exists and is a different entry.
    #[error("rename conflict: {} already exists (from {})", to.display(), from.display())]
    RenameConflict { from: PathBuf, to: PathBuf },

    /// An underlying filesystem call failed.
    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Build(#[from] BuildError),

    /// The interactive resolver was dismissed.
    #[error("cancelled by user: {}", path.display())]
    Cancelled { path: PathBuf },

    /// The batch deadline passed before this item was attempted.
    #[error("abandoned after deadline: {}", path.display())]
    Abandoned { path: PathBuf },

    /// Tag container could not be read or written.
    #[error("tag error at {}: {message}", path.display())]
    Tags { path: PathBuf, message: String },

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl Error {
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Convenience Result type using the crate `Error`.
pub type Result<T> = std::result::Result<T, Error>;
