use std::path::PathBuf;

use parks::ParkError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GuideError>;

#[derive(Debug, Error)]
pub enum GuideError {
    #[error(transparent)]
    Park(#[from] ParkError),

    #[error("failed to assemble document at {path:?}: {message}")]
    Assembly { path: PathBuf, message: String },

    #[error("failed to draw map: {0}")]
    Map(String),

    #[error("configuration error ({key}): {message}")]
    Config { key: String, message: String },
}

impl GuideError {
    pub(crate) fn assembly(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Self::Assembly {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
