use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupted data: {0}")]
    Corrupted(String),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl SaveError {
    /// Load errors that fall back to defaults instead of failing startup
    pub fn is_recoverable(&self) -> bool {
        match self {
            SaveError::FileNotFound { .. } => true,
            SaveError::Json(_) => true,
            SaveError::Corrupted(_) => true,
            SaveError::Io(_) => false,
        }
    }
}
