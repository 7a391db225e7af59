//! Error types for the push server
//!
//! Only startup can fail fatally. Once the server is listening, per-connection
//! problems are logged and end that connection alone.

use std::net::SocketAddr;

/// Startup configuration errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Required variable not set
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// Variable set but unusable
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        /// Variable name
        var: &'static str,
        /// Raw value as found
        value: String,
        /// What was expected
        reason: String,
    },

    /// `.env` file present but unreadable or malformed
    #[error("failed to load {path}: {reason}")]
    EnvFile {
        /// File that failed
        path: String,
        /// Loader error
        reason: String,
    },
}

impl ConfigError {
    /// Create invalid-value error
    #[inline]
    pub fn invalid(var: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Server lifecycle errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration rejected
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Listener could not be bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address requested
        addr: SocketAddr,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Accept loop failed
    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
}
