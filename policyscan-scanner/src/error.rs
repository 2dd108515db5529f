use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{url} returned HTTP {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("No privacy policy link located (pattern: {0})")]
    NotFound(String),

    #[error("Multiple candidate links found: {}", .0.join(", "))]
    AmbiguousResult(Vec<String>),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Failure categories reported to the user when a scan aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    Parse,
    NotFound,
    AmbiguousResult,
    InvalidArgument,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Fetch => "FetchError",
            ErrorKind::Parse => "ParseError",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::AmbiguousResult => "AmbiguousResult",
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::Io => "IOError",
        };
        f.write_str(name)
    }
}

impl ScanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScanError::HttpError(_)
            | ScanError::InvalidUrl { .. }
            | ScanError::UnexpectedStatus { .. } => ErrorKind::Fetch,
            ScanError::ParseError(_) => ErrorKind::Parse,
            ScanError::NotFound(_) => ErrorKind::NotFound,
            ScanError::AmbiguousResult(_) => ErrorKind::AmbiguousResult,
            ScanError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ScanError::IoError(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
