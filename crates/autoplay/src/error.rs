use skyjo_core::{ConfigError, RoundError, SessionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoplayError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("round error: {0}")]
    Round(#[from] RoundError),
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    #[error("no legal action for seat {0}")]
    NoLegalAction(usize),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for AutoplayError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for AutoplayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}
