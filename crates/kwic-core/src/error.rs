use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not open file: {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid search pattern '{keyword}': {reason}")]
    MatchPattern { keyword: String, reason: String },

    #[error("Unknown topic: {0}")]
    UnknownTopic(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn source_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnavailable { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
