use thiserror::Error;

/// Failure of a remote persistence call.
///
/// Distinct from [`PersistError`] so callers can tell "the server said no"
/// apart from local storage trouble; carries the server's own detail string
/// when it sent one.
#[derive(Debug, Error)]
pub enum RemoteSaveError {
    /// Could not reach the server, or the exchange broke mid-flight.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Reached the server but got a non-2xx answer.
    #[error("server returned HTTP {0}")]
    Status(u16),
    /// 2xx answer whose body reported a structured rejection.
    #[error("server rejected the request: {0}")]
    Rejected(String),
}

/// Failure of the local durable store.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed data file: {0}")]
    Format(#[from] serde_json::Error),
    #[error(transparent)]
    Remote(#[from] RemoteSaveError),
}
