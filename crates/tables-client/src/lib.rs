//! Headless live table client
//!
//! Seeds a [`RowStore`](tables_core::RowStore), opens the mutation channel,
//! sends the ready token once the table is sorted, and then feeds every pushed
//! event through a [`Reconciler`](tables_core::Reconciler) that paints to a
//! terminal.
//!
//! # Example
//!
//! ```rust,ignore
//! use tables_client::{app, seed, ClientOptions, TerminalPainter};
//!
//! let options = ClientOptions::from_query("data=100&sort=yes&refresh=500");
//! let source = seed::source_for(options.data_size, None)?;
//! let painter = TerminalPainter::new(std::io::stdout(), 20);
//! app::run("ws://localhost:7770", &options, source, painter, tokio::signal::ctrl_c()).await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod app;
pub mod error;
pub mod options;
pub mod painter;
pub mod seed;

// Re-exports
pub use error::{ClientError, SeedError};
pub use options::ClientOptions;
pub use painter::TerminalPainter;
pub use seed::{EmbeddedSource, FileSource, MemorySource, NameServiceSource, SeedSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
