use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),

    #[cfg(feature = "db")]
    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Export job error: {message}")]
    Export { message: String },
}

pub type Result<T> = std::result::Result<T, ViewerError>;
