//! Testing utilities for the live tables workspace
//!
//! Shared fixtures: seed rows, stores and a painter that records every frame.

#![allow(missing_docs)]

use std::sync::Arc;
use tables_core::{DisplayMode, Reconciler, Repaint, Row, RowId, RowStore};

/// One recorded repaint
#[derive(Debug, Clone)]
pub struct Frame {
    pub rows: Vec<Arc<Row>>,
}

impl Frame {
    pub fn ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|row| row.id).collect()
    }

    pub fn values(&self) -> Vec<i64> {
        self.rows.iter().map(|row| row.value).collect()
    }
}

/// Painter that keeps every frame it was asked to draw
#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub frames: Vec<Frame>,
}

impl RecordingPainter {
    pub fn count(&self) -> usize {
        self.frames.len()
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl Repaint for RecordingPainter {
    fn repaint(&mut self, rows: &[Arc<Row>]) {
        self.frames.push(Frame {
            rows: rows.to_vec(),
        });
    }
}

/// Rows `0..values.len()` with the given values, named `ROW <id>`
pub fn rows_with_values(values: &[i64]) -> Vec<Row> {
    values
        .iter()
        .zip(0u32..)
        .map(|(&value, id)| Row::new(id, value, format!("ROW {id}")))
        .collect()
}

/// `n` rows with `value == id`
pub fn sequential_rows(n: u32) -> Vec<Row> {
    (0..n)
        .map(|id| Row::new(id, i64::from(id), format!("ROW {id}")))
        .collect()
}

pub fn store_with_values(values: &[i64]) -> RowStore {
    RowStore::from_rows(rows_with_values(values)).unwrap()
}

pub fn recording_reconciler(values: &[i64], mode: DisplayMode) -> Reconciler<RecordingPainter> {
    Reconciler::new(store_with_values(values), mode, RecordingPainter::default())
}
