use thiserror::Error;

/// Errors surfaced by the calendar core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Date/time parsing failed: {0}")]
    DateTime(#[from] chrono::ParseError),

    #[error("Calendar service returned HTTP {0}")]
    Status(u16),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network timeout")]
    Timeout,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
