use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while walking or rewriting files.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("walk limit exceeded: {0}")]
    LimitExceeded(String),
    #[error("replacement pattern must not be empty")]
    EmptyPattern,
}

impl WalkError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WalkError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type WalkResult<T> = Result<T, WalkError>;
