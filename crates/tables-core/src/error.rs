//! Error types for the row store and reconciler
//!
//! None of these are fatal to a running client: a rejected or malformed
//! event leaves the table as it was and the display goes stale at worst.

use crate::row::RowId;

/// Row store construction and addressing errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// No rows supplied
    #[error("row store cannot be empty")]
    Empty,

    /// More rows than the table may hold
    #[error("row store too large: {len} rows (max: {max})")]
    TooLarge {
        /// Rows supplied
        len: usize,
        /// Table capacity
        max: usize,
    },

    /// Two seed rows share an id
    #[error("duplicate row id: {0}")]
    DuplicateId(RowId),

    /// Seed row id does not fit the `0..len` sequence
    #[error("row id {id} out of sequence for {len} rows")]
    IdOutOfSequence {
        /// Offending id
        id: RowId,
        /// Rows supplied
        len: usize,
    },

    /// Event addresses a row this table does not have
    #[error("row id {id} out of range (table has {len} rows)")]
    OutOfRange {
        /// Id carried by the event
        id: i64,
        /// Rows in the table
        len: usize,
    },
}

/// Errors from applying one incoming event
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// Event was well formed but addressed a missing row
    #[error("event rejected: {0}")]
    Rejected(#[from] StoreError),

    /// Payload was not a mutation event
    #[error("malformed event payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ReconcileError {
    /// Check if the event was discarded for an out-of-range id
    #[inline]
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::Rejected(StoreError::OutOfRange { .. }))
    }
}
