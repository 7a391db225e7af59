//! Live Tables Core
//!
//! The client-side half of a live-updating table plus the wire format both
//! sides agree on:
//! - [`RowStore`]: bounded, id-addressable table of rows
//! - [`Reconciler`]: applies [`MutationEvent`]s under a [`DisplayMode`]
//! - [`protocol`]: handshake tokens and the event JSON codec
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tables_core::{DisplayMode, MutationEvent, Reconciler, Row, RowStore};
//!
//! let rows = (0u32..3).map(|i| Row::new(i, i64::from(i), format!("ROW {i}"))).collect();
//! let store = RowStore::from_rows(rows).unwrap();
//!
//! let mut repaints = 0;
//! let mut reconciler = Reconciler::new(store, DisplayMode::Immediate, |_: &[Arc<Row>]| {
//!     repaints += 1;
//! });
//!
//! reconciler.apply(MutationEvent::new(1, 99, "X Y")).unwrap();
//! assert_eq!(reconciler.stats().repaints, 1);
//! ```

#![deny(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
#[cfg(feature = "subscriber")]
pub mod logging;
pub mod protocol;
pub mod reconciler;
pub mod row;
pub mod store;

// Re-exports
pub use error::{ReconcileError, StoreError};
pub use protocol::{Handshake, NOT_READY_TOKEN, READY_TOKEN};
pub use reconciler::{Applied, Reconciler, ReconcilerStats, Repaint};
pub use row::{DisplayMode, MutationEvent, Row, RowId};
pub use store::{RowStore, MAX_ROWS};

/// Common imports for working with the core types
pub mod prelude {
    pub use crate::{
        Applied, DisplayMode, Handshake, MutationEvent, ReconcileError, Reconciler, Repaint,
        Row, RowId, RowStore,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
