use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MgcbError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Log file setup failed: {0}")]
    LogFile(#[from] tracing_appender::rolling::InitError),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MgcbError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MgcbError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MgcbError>;
