//! Row, event and display-mode types
//!
//! Rows and events share a wire shape: `{"id": .., "value": .., "name": ..}`.
//! An event's id is kept signed because nothing guarantees the sender stays
//! inside the receiver's table.

use serde::{Deserialize, Serialize};

/// Stable row identifier, equal to the row's seed-time position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u32);

impl RowId {
    /// Position this id had when the table was seeded
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for RowId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Immutable id
    pub id: RowId,
    /// Sort key
    pub value: i64,
    /// Display name
    pub name: String,
}

impl Row {
    /// Create new row
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<RowId>, value: i64, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value,
            name: name.into(),
        }
    }
}

/// Full replacement of one row's mutable fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationEvent {
    /// Target row id (may be outside the receiver's table)
    pub id: i64,
    /// New value
    pub value: i64,
    /// New name
    pub name: String,
}

impl MutationEvent {
    /// Create new event
    #[inline]
    #[must_use]
    pub fn new(id: i64, value: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            value,
            name: name.into(),
        }
    }
}

/// How the reconciler turns events into repaints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Repaint synchronously after every applied event
    #[default]
    Immediate,
    /// Apply silently; re-sort and repaint on a separate refresh tick
    BatchedSorted,
}

impl DisplayMode {
    /// Whether this mode needs a refresh timer
    #[inline]
    #[must_use]
    pub fn is_batched(self) -> bool {
        matches!(self, Self::BatchedSorted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_wire_shape() {
        let row = Row::new(3, 42, "MARY SMITH");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "value": 42, "name": "MARY SMITH"}));
    }

    #[test]
    fn event_accepts_negative_id() {
        let event: MutationEvent =
            serde_json::from_str(r#"{"id": -4, "value": 1, "name": "A B"}"#).unwrap();
        assert_eq!(event.id, -4);
    }

    #[test]
    fn display_mode_default_is_immediate() {
        assert_eq!(DisplayMode::default(), DisplayMode::Immediate);
        assert!(!DisplayMode::Immediate.is_batched());
        assert!(DisplayMode::BatchedSorted.is_batched());
    }
}
