//! Error types for deploynotify-core

use std::fmt;

/// Result type alias for deploynotify operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for deploynotify operations
#[derive(Debug)]
pub enum Error {
    /// Invalid configuration
    Config(String),

    /// Transport-level HTTP error (connect, timeout, non-2xx status)
    Http(String),

    /// Slack Web API answered `ok: false`
    Slack(String),

    /// API rate limit exceeded
    RateLimitExceeded(String),

    /// Runtime error (Tokio)
    Runtime(String),

    /// Other errors
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Http(msg) => write!(f, "HTTP error: {}", msg),
            Error::Slack(msg) => write!(f, "Slack API error: {}", msg),
            Error::RateLimitExceeded(msg) => write!(f, "Rate limit exceeded: {}", msg),
            Error::Runtime(msg) => write!(f, "Runtime error: {}", msg),
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // reqwest errors may embed the request URL but never headers, so the
        // bearer token cannot leak through here.
        Error::Http(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", err))
    }
}

/// Fieldless error category for cheap pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Configuration error
    Config,
    /// HTTP error
    Http,
    /// Slack API error
    Slack,
    /// API rate limit exceeded
    RateLimitExceeded,
    /// Runtime error
    Runtime,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Http(_) => ErrorKind::Http,
            Error::Slack(_) => ErrorKind::Slack,
            Error::RateLimitExceeded(_) => ErrorKind::RateLimitExceeded,
            Error::Runtime(_) => ErrorKind::Runtime,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Borrow the error message
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            Error::Config(msg)
            | Error::Http(msg)
            | Error::Slack(msg)
            | Error::RateLimitExceeded(msg)
            | Error::Runtime(msg)
            | Error::Other(msg) => msg,
        }
    }
}
