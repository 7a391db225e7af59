//! Live Tables push server
//!
//! Every WebSocket connection gets its own [`Session`]. Once the client sends
//! the ready token the session starts a self-correcting [`ticker`] that emits
//! one random [`MutationEvent`](tables_core::MutationEvent) per period until
//! the connection closes.
//!
//! # Example
//!
//! ```rust,ignore
//! use tables_server::{ServerConfig, TableServer};
//!
//! let config = ServerConfig::from_env()?;
//! let server = TableServer::bind(config, "0.0.0.0".parse()?).await?;
//! server.run().await?;
//! ```

#![deny(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod generator;
pub mod names;
pub mod server;
pub mod session;
pub mod ticker;

// Re-exports
pub use config::ServerConfig;
pub use error::{ConfigError, ServerError};
pub use generator::MutationGenerator;
pub use names::NamePool;
pub use server::TableServer;
pub use session::Session;
pub use ticker::{spawn_every, TickerHandle};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
