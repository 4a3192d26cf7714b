use reqwest::StatusCode;
use thiserror::Error;

use crate::store::CharacterId;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

// Enum for handling various application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Logger already initialized")]
    LoggerAlreadyInitialized,
}

// Failures talking to the remote roster endpoint.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server answered with status {0}")]
    Status(StatusCode),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("No character at index {index} (roster holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Character not found: {0}")]
    UnknownCharacter(CharacterId),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Could not locate the home directory")]
    HomeDirNotFound,

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
