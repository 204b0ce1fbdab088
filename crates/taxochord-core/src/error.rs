pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load records from {path}: {message}")]
    Load { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input is missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn load(path: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Load {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
