use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Upstream API error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    /// Short, stable label used for metrics and structured logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation",
            AppError::BadRequest(_) => "bad_request",
            AppError::NotFound(_) => "not_found",
            AppError::Upstream { .. } => "upstream",
            AppError::HttpError(_) => "http",
            AppError::DecodeError(_) => "decode",
            AppError::InternalError(_) => "internal",
            AppError::ConfigError(_) => "config",
        }
    }

    /// Whether the error was caused by the caller's input rather than the API.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::ValidationError(_) | AppError::BadRequest(_) | AppError::NotFound(_)
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}
