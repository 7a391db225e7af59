//! Update reconciliation
//!
//! Applies a continuous, unordered stream of [`MutationEvent`]s to a
//! [`RowStore`] and decides when the display is repainted:
//!
//! - [`DisplayMode::Immediate`]: one synchronous repaint per applied event
//! - [`DisplayMode::BatchedSorted`]: no repaint on apply; the owner calls
//!   [`Reconciler::refresh`] from its own timer, which re-sorts and repaints
//!   once for everything applied since the previous tick
//!
//! Rejected and malformed events never repaint and are never reported back
//! to the sender.

use crate::error::ReconcileError;
use crate::row::{DisplayMode, MutationEvent, Row};
use crate::store::RowStore;
use std::sync::Arc;

/// Repaint observer
///
/// Receives the rows in display order. Rows whose `Arc` did not change since
/// the previous repaint were not touched.
pub trait Repaint {
    /// Redraw the table
    fn repaint(&mut self, rows: &[Arc<Row>]);
}

impl<F> Repaint for F
where
    F: FnMut(&[Arc<Row>]),
{
    fn repaint(&mut self, rows: &[Arc<Row>]) {
        self(rows);
    }
}

/// What happened to an accepted event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Applied and repainted in the same call
    Repainted,
    /// Applied; waiting for the next refresh tick
    Deferred,
}

/// Reconciler counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcilerStats {
    /// Events applied to the store
    pub applied: u64,
    /// Events discarded for an out-of-range id
    pub rejected: u64,
    /// Payloads that were not events
    pub malformed: u64,
    /// Repaints triggered
    pub repaints: u64,
    /// Events applied since the last repaint
    pub pending: u64,
}

/// Applies mutation events to a row store under one display mode
#[derive(Debug)]
pub struct Reconciler<P> {
    store: RowStore,
    mode: DisplayMode,
    painter: P,
    stats: ReconcilerStats,
}

impl<P: Repaint> Reconciler<P> {
    /// Take ownership of a seeded store
    ///
    /// The store is sorted once here regardless of mode. Nothing is painted
    /// until [`render`](Self::render) or the first event / refresh.
    #[must_use]
    pub fn new(mut store: RowStore, mode: DisplayMode, painter: P) -> Self {
        store.sort_by_value_desc();
        Self {
            store,
            mode,
            painter,
            stats: ReconcilerStats::default(),
        }
    }

    /// Active display mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Current table state
    #[inline]
    #[must_use]
    pub fn store(&self) -> &RowStore {
        &self.store
    }

    /// Counters so far
    #[inline]
    #[must_use]
    pub fn stats(&self) -> ReconcilerStats {
        self.stats
    }

    /// Repaint observer
    #[inline]
    #[must_use]
    pub fn painter(&self) -> &P {
        &self.painter
    }

    /// Paint the current state unconditionally
    pub fn render(&mut self) {
        self.painter.repaint(self.store.rows());
        self.stats.repaints += 1;
        self.stats.pending = 0;
    }

    /// Apply one decoded event
    ///
    /// # Errors
    /// `ReconcileError::Rejected` if the id is outside the table; the store
    /// is unchanged and nothing is repainted.
    pub fn apply(&mut self, event: MutationEvent) -> Result<Applied, ReconcileError> {
        if let Err(err) = self.store.replace(event) {
            self.stats.rejected += 1;
            tracing::info!("Ignoring event for a row this table does not show: {}", err);
            return Err(err.into());
        }

        self.stats.applied += 1;
        self.stats.pending += 1;

        match self.mode {
            DisplayMode::Immediate => {
                self.render();
                Ok(Applied::Repainted)
            }
            DisplayMode::BatchedSorted => Ok(Applied::Deferred),
        }
    }

    /// Decode and apply one wire frame
    ///
    /// # Errors
    /// - `ReconcileError::Malformed` if the frame is not an event
    /// - `ReconcileError::Rejected` as for [`apply`](Self::apply)
    pub fn apply_payload(&mut self, payload: &str) -> Result<Applied, ReconcileError> {
        match MutationEvent::from_json(payload) {
            Ok(event) => self.apply(event),
            Err(err) => {
                self.stats.malformed += 1;
                tracing::warn!("Discarding malformed event payload: {}", err);
                Err(err.into())
            }
        }
    }

    /// Refresh tick for batched mode: re-sort and repaint once
    ///
    /// Returns whether a repaint happened. A no-op in immediate mode.
    pub fn refresh(&mut self) -> bool {
        if !self.mode.is_batched() {
            return false;
        }

        tracing::trace!("Refreshing after {} pending events", self.stats.pending);
        self.store.sort_by_value_desc();
        self.render();
        true
    }
}
