use thiserror::Error;

/// Errors surfaced by the car finder library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not access stored data: {0}")]
    Storage(#[from] StorageError),
    #[error("Could not talk to the catalog: {0}")]
    Fetch(#[from] FetchError),
    #[error("Could not determine a data directory. Pass --data-dir explicitly.")]
    NoDataDirectory,
}

/// Why a catalog request failed.
///
/// All variants take the same "fetch failed" path in the view. They are kept
/// apart for the log. Payloads are strings so the error can travel inside a
/// GUI message, which has to be `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Failed to fetch cars: {0}")]
    Transport(String),
    #[error("Failed to fetch cars (status {0})")]
    Status(u16),
    #[error("Failed to fetch cars: the response was not a list of cars ({0})")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            FetchError::Decode(value.to_string())
        } else if let Some(status) = value.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(value.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not read '{key}'. {source}")]
    Read {
        key: String,
        source: std::io::Error,
    },
    #[error("Could not write '{key}'. {source}")]
    Write {
        key: String,
        source: std::io::Error,
    },
    #[error("The stored value for '{key}' is malformed. {source}")]
    Malformed {
        key: String,
        source: serde_json::Error,
    },
    #[error("Could not serialize the value for '{key}'. {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
}
