// SPDX-License-Identifier: MPL-2.0
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    /// Bytes were fetched but could not be decoded as an image.
    Decode(String),
    /// Remote fetch failed (connection, HTTP status, body).
    Fetch(String),
    /// A single frame did not settle within the preload timeout.
    Timeout(Duration),
    /// The URI uses a scheme frames cannot be loaded from.
    UnsupportedUri(String),
    /// Persisted viewer state could not be encoded or decoded.
    State(String),
}

impl Error {
    /// Returns true if this error came from the per-frame timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::Fetch(e) => write!(f, "Fetch Error: {}", e),
            Error::Timeout(d) => write!(f, "Timed out after {} ms", d.as_millis()),
            Error::UnsupportedUri(uri) => write!(f, "Unsupported frame URI: {}", uri),
            Error::State(e) => write!(f, "State Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Fetch(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
