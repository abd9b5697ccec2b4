/// Fatal application errors.
///
/// Anything surfacing as an `AppError` stops the run before (or instead of) the per-item
/// loop; per-item failures never reach this type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Invalid regex: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("FreshRSS unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Failed to initialize Karakeep client: {0}")]
    DestinationUnavailable(String),
}

impl AppError {
    /// Process exit status reported for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Logging(_) | Self::InvalidPattern(_) => 2,
            Self::SourceUnavailable(_) | Self::DestinationUnavailable(_) => 1,
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
