use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NagError {
    #[error("invalid config: {0}")]
    Config(String),

    #[error("no config file found in {0}")]
    ConfigNotFound(String),

    #[error("last-run ledger {}: {reason}", path.display())]
    Storage { path: PathBuf, reason: String },

    #[error("could not launch command for '{name}': {reason}")]
    Execution { name: String, reason: String },

    #[error("no entry named '{0}'")]
    EntryNotFound(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl NagError {
    pub fn storage(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        NagError::Storage {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Execution failures are isolated to one entry; everything else aborts
    /// the invocation.
    pub fn is_per_entry(&self) -> bool {
        matches!(self, NagError::Execution { .. })
    }
}

pub type Result<T> = std::result::Result<T, NagError>;
