//! Row store
//!
//! Rows are held as `Arc<Row>` so that a replaced row is always a new
//! allocation: observers that memoize on pointer identity see every update,
//! while untouched rows keep their identity across sorts.
//!
//! Events address rows by id, not by position. Sorting moves rows around,
//! so the store keeps an id -> position index alongside the ordered rows.

use crate::error::StoreError;
use crate::row::{MutationEvent, Row, RowId};
use std::sync::Arc;

/// Largest table the store accepts
pub const MAX_ROWS: usize = 5000;

/// Ordered, id-addressable table of rows
#[derive(Debug, Clone)]
pub struct RowStore {
    /// Rows in display order
    rows: Vec<Arc<Row>>,
    /// `positions[id]` is the current display position of row `id`
    positions: Vec<usize>,
}

impl RowStore {
    /// Build a store from seed rows
    ///
    /// The ids must be exactly `0..rows.len()` in any order.
    ///
    /// # Errors
    /// - `StoreError::Empty` / `StoreError::TooLarge` if the size is outside `1..=MAX_ROWS`
    /// - `StoreError::IdOutOfSequence` / `StoreError::DuplicateId` for a bad id set
    pub fn from_rows(rows: Vec<Row>) -> Result<Self, StoreError> {
        let len = rows.len();
        if len == 0 {
            return Err(StoreError::Empty);
        }
        if len > MAX_ROWS {
            return Err(StoreError::TooLarge { len, max: MAX_ROWS });
        }

        let mut slots: Vec<Option<usize>> = vec![None; len];
        for (position, row) in rows.iter().enumerate() {
            let slot = slots
                .get_mut(row.id.index())
                .ok_or(StoreError::IdOutOfSequence { id: row.id, len })?;
            if slot.replace(position).is_some() {
                return Err(StoreError::DuplicateId(row.id));
            }
        }

        // len distinct ids below len: every slot is filled
        let positions = slots.into_iter().flatten().collect();

        Ok(Self {
            rows: rows.into_iter().map(Arc::new).collect(),
            positions,
        })
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for a constructed store
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in display order
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Arc<Row>] {
        &self.rows
    }

    /// Look up a row by id
    #[must_use]
    pub fn get(&self, id: RowId) -> Option<&Arc<Row>> {
        self.positions
            .get(id.index())
            .and_then(|&position| self.rows.get(position))
    }

    /// Ids in display order
    #[must_use]
    pub fn ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|row| row.id).collect()
    }

    /// Resolve a wire id to a display position
    ///
    /// # Errors
    /// `StoreError::OutOfRange` unless `0 <= id < len`
    pub fn position_of(&self, id: i64) -> Result<usize, StoreError> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.positions.get(index).copied())
            .ok_or(StoreError::OutOfRange { id, len: self.len() })
    }

    /// Replace the mutable fields of the row the event addresses
    ///
    /// The row is substituted with a new `Arc`; its id is carried forward.
    /// Returns the previous row.
    ///
    /// # Errors
    /// `StoreError::OutOfRange` if the event addresses a missing row; the
    /// store is left untouched.
    pub fn replace(&mut self, event: MutationEvent) -> Result<Arc<Row>, StoreError> {
        let position = self.position_of(event.id)?;
        let slot = &mut self.rows[position];
        let next = Arc::new(Row {
            id: slot.id,
            value: event.value,
            name: event.name,
        });
        Ok(std::mem::replace(slot, next))
    }

    /// Stable sort by `value`, highest first
    pub fn sort_by_value_desc(&mut self) {
        self.rows.sort_by(|a, b| b.value.cmp(&a.value));
        self.reindex();
    }

    /// Rebuild the id -> position index after a reorder
    fn reindex(&mut self) {
        for (position, row) in self.rows.iter().enumerate() {
            self.positions[row.id.index()] = position;
        }
    }
}
