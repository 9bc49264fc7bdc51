use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid metadata in {}: {reason}", path.display())]
    InvalidMetadata { path: PathBuf, reason: String },

    #[error("missing marker {marker}: {reason}")]
    MissingMarker { marker: String, reason: String },

    #[error("marker {marker} appears {count} times, expected exactly once")]
    DuplicateMarker { marker: String, count: usize },

    #[error("cannot update homepage {}", path.display())]
    Homepage {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for marker problems, including those wrapped in
    /// [`Error::Homepage`].
    pub fn is_marker_error(&self) -> bool {
        match self {
            Self::MissingMarker { .. } | Self::DuplicateMarker { .. } => true,
            Self::Homepage { source, .. } => source.is_marker_error(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
