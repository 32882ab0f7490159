use std::path::PathBuf;

use thiserror::Error;

/// Core error type shared across tablemaker crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The database could not be reached or a connection could not be opened.
    #[error("connection error: {0}")]
    Connect(String),
    /// The catalog query failed or timed out.
    #[error("query error: {0}")]
    Query(String),
    /// A rendered table could not be written to its destination.
    #[error("write error: {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A table violates the model invariants.
    #[error("invalid table: {0}")]
    InvalidTable(String),
    /// A background task panicked or was aborted.
    #[error("task error: {0}")]
    Task(String),
}

/// Convenience alias for results returned by tablemaker crates.
pub type Result<T> = std::result::Result<T, Error>;
