use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("journal error: {0}")]
    Journal(#[from] partida_journal::JournalError),

    #[error("type error: {0}")]
    Type(#[from] partida_types::TypeError),

    #[error("book file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed book file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
