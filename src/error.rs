// file: src/error.rs
// description: custom error types and result type alias
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Repository discovery failed under {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Backend query failed: {0}")]
    BackendQuery(String),

    #[error("Backend command failed: {0}")]
    BackendMutation(String),

    #[error("Path mapping error: {} is not under {}", .path.display(), .root.display())]
    PathMapping { path: PathBuf, root: PathBuf },

    #[error("Mirror failed: {0}")]
    Mirror(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
