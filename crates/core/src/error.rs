use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailure {
    #[error("server returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("request cancelled")]
    Cancelled,
}

impl From<serde_json::Error> for RequestFailure {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionValueError {
    #[error("malformed option value: {0}")]
    Malformed(String),
    #[error("option value is missing the player id")]
    MissingPlayer,
    #[error("option index {index} out of range (max {max})")]
    OutOfRange { index: u8, max: u8 },
}
