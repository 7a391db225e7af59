//! Terminal repaint observer
//!
//! Draws the top rows of each frame as plain text. A row whose `Arc` differs
//! from the one drawn for the same id in the previous frame is marked `*`,
//! which is how replaced rows are told apart from rows that only moved.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;
use tables_core::{Repaint, Row, RowId};

/// Renders frames to any writer
#[derive(Debug)]
pub struct TerminalPainter<W> {
    out: W,
    visible: usize,
    last_seen: HashMap<RowId, Arc<Row>>,
    frames: u64,
}

impl<W: Write> TerminalPainter<W> {
    /// Painter showing the first `visible` rows of every frame
    pub fn new(out: W, visible: usize) -> Self {
        Self {
            out,
            visible,
            last_seen: HashMap::new(),
            frames: 0,
        }
    }

    /// Frames drawn so far
    #[inline]
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, rows: &[Arc<Row>]) -> io::Result<()> {
        writeln!(self.out, "-- frame {} ({} rows) --", self.frames, rows.len())?;

        for row in rows.iter().take(self.visible) {
            let changed = self
                .last_seen
                .get(&row.id)
                .is_some_and(|previous| !Arc::ptr_eq(previous, row));
            let marker = if changed { '*' } else { ' ' };
            writeln!(
                self.out,
                "{marker} {:>5} {:>7}  {}",
                row.id.0, row.value, row.name
            )?;
        }

        for row in rows {
            self.last_seen.insert(row.id, Arc::clone(row));
        }
        self.out.flush()
    }
}

impl<W: Write> Repaint for TerminalPainter<W> {
    fn repaint(&mut self, rows: &[Arc<Row>]) {
        self.frames += 1;
        if let Err(err) = self.draw(rows) {
            tracing::warn!("Failed to draw frame {}: {}", self.frames, err);
        }
    }
}
