//! Error types for chainpulse.
#![allow(dead_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Network or provider failure while fetching external data.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The provider answered, but not in the shape we expect.
    #[error("Unexpected response shape: {0}")]
    Format(String),

    /// The transport collaborator rejected a send.
    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Telegram error: {0}")]
    Telegram(String),

    #[error("Scheduler error: {0}")]
    Schedule(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Fetch(e.to_string())
    }
}
