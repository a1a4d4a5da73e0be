/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("no text to synthesize")]
    EmptyInput,

    #[error("network error: {0}")]
    Network(String),

    #[error("API request failed: {status} {status_text} - {detail}")]
    Api {
        status: u16,
        status_text: String,
        detail: String,
    },

    #[error("failed to save audio file: {0}")]
    StorageWrite(String),

    #[error("audio playback failed: {0}")]
    Playback(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
