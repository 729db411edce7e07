//! Error types for loading grid data.
//!
//! Every way a grid fetch can fail collapses into [`LoadError`].  The grid
//! logs the full error and shows [`LoadError::summary`] in place of the
//! cards, so the page never sees anything worse than a short message.

use thiserror::Error;

/// Why a grid source could not be turned into a list of items.
#[derive(Debug, Error)]
pub enum LoadError {
    /// `src` could not be resolved against the page base URL.
    #[error("invalid source url '{src}': {source}")]
    InvalidUrl {
        src: String,
        source: url::ParseError,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} {reason}")]
    Status { status: u16, reason: String },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// Reading a local `file://` source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The body was not JSON at all.
    #[error("invalid JSON: {0}")]
    NotJson(#[from] serde_json::Error),

    /// The body was JSON but not an array.
    #[error("JSON must be an array")]
    NotArray,

    /// The URL scheme is neither http(s) nor file.
    #[error("unsupported url scheme '{0}'")]
    UnsupportedScheme(String),
}

impl LoadError {
    /// Short, user-facing description (status line or error kind).
    pub fn summary(&self) -> String {
        match self {
            LoadError::InvalidUrl { .. } => "invalid source".into(),
            LoadError::Status { status, reason } if reason.is_empty() => status.to_string(),
            LoadError::Status { status, reason } => format!("{status} {reason}"),
            LoadError::Transport(_) => "network error".into(),
            LoadError::Io(_) => "file not readable".into(),
            LoadError::NotJson(_) => "not JSON".into(),
            LoadError::NotArray => "JSON must be an array".into(),
            LoadError::UnsupportedScheme(scheme) => format!("unsupported scheme {scheme}"),
        }
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        LoadError::Transport(err.to_string())
    }
}
