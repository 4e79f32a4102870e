use thiserror::Error;

pub type Result<T> = std::result::Result<T, PollerError>;

/// Fatal errors. Anything in here ends the run with a non-zero exit code.
#[derive(Error, Debug)]
pub enum PollerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to move output into place: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),
}

impl PollerError {
    pub fn config(message: impl std::fmt::Display) -> Self {
        PollerError::Config(message.to_string())
    }

    pub fn is_config(&self) -> bool {
        matches!(
            self,
            PollerError::Config(_) | PollerError::ConfigSource(_) | PollerError::Validation(_)
        )
    }
}

/// Per-locality failure. Recorded in the batch, never propagated out of a run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Quota limit reached (HTTP 429)")]
    QuotaExceeded,

    #[error("HTTP request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("API returned status {status}: {message}")]
    Api { status: String, message: String },
}
