use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("I/O error: {0}")]
    IoError(String),
    /// The trigger is disabled while a generation request is outstanding;
    /// a second `generate()` in that window is refused with this.
    #[error("a generation request is already in flight")]
    RequestInFlight,
}

impl From<std::io::Error> for SignError {
    fn from(e: std::io::Error) -> Self {
        SignError::IoError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SignError>;
