//! Error types shared by the fetcher, configuration loader and reporter.

/// Errors produced while fetching pages, loading configuration or saving results.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target string could not be parsed as a URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Network failure, timeout or body read failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Reading a config file or writing the results file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of range or unknown.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
