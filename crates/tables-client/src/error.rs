//! Client error types

use std::path::PathBuf;
use tables_core::StoreError;
use thiserror::Error;

/// Seeding failures; none of them are retried
#[derive(Debug, Error)]
pub enum SeedError {
    /// Seed file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Name service request failed
    #[error("name service request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Name service URL could not be built
    #[error("invalid name service url: {0}")]
    Url(#[from] url::ParseError),

    /// Payload was not the expected JSON
    #[error("malformed seed data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Source returned a different number of rows than requested
    #[error("expected {expected} rows, got {actual}")]
    SizeMismatch {
        /// Requested table size
        expected: usize,
        /// Rows actually returned
        actual: usize,
    },

    /// Rows did not form a valid table
    #[error("invalid seed rows: {0}")]
    Store(#[from] StoreError),
}

/// Errors ending a client session
#[derive(Debug, Error)]
pub enum ClientError {
    /// Seeding failed; the ready token was never sent
    #[error("seeding failed: {0}")]
    Seed(#[from] SeedError),

    /// Seeding task panicked or was cancelled
    #[error("seeding task failed: {0}")]
    SeedTask(#[from] tokio::task::JoinError),

    /// WebSocket connect, send or receive failed
    #[error("channel error: {0}")]
    Channel(#[from] tokio_tungstenite::tungstenite::Error),
}
