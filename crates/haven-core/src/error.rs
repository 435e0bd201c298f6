use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Your one-time code was created but could not be delivered: {0}")]
    OtpDispatch(String),

    #[error("One-time code is invalid or has expired")]
    OtpInvalid,

    #[error("{0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Validation error for a missing required field.
    pub fn required(field: &str) -> Self {
        Self::Validation(format!("{field} is required"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
