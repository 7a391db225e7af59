//! Channel protocol
//!
//! Client -> server frames are plain text handshake tokens. Only the exact
//! ready token starts a mutation stream; everything else is ignored.
//! Server -> client frames are one JSON-encoded [`MutationEvent`] each.

use crate::row::MutationEvent;

/// Token a client sends once its table is seeded and sorted
pub const READY_TOKEN: &str = "init";

/// Token a client sends when the channel opens before seeding finished
pub const NOT_READY_TOKEN: &str = "not ready";

/// Classified inbound handshake frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handshake {
    /// Start streaming
    Ready,
    /// Informational; treated like any unknown token
    NotReady,
    /// Anything else
    Unknown,
}

impl Handshake {
    /// Classify a text frame (exact match, no trimming)
    #[must_use]
    pub fn parse(frame: &str) -> Self {
        match frame {
            READY_TOKEN => Self::Ready,
            NOT_READY_TOKEN => Self::NotReady,
            _ => Self::Unknown,
        }
    }
}

impl MutationEvent {
    /// Encode as a wire frame
    ///
    /// # Errors
    /// Only if serialization itself fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a wire frame
    ///
    /// # Errors
    /// If the payload is not a JSON object with integer `id` / `value` and
    /// string `name`
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_tokens_are_recognized() {
        assert_eq!(Handshake::parse("init"), Handshake::Ready);
        assert_eq!(Handshake::parse("not ready"), Handshake::NotReady);
        assert_eq!(Handshake::parse("ready"), Handshake::Unknown);
        assert_eq!(Handshake::parse("init "), Handshake::Unknown);
        assert_eq!(Handshake::parse("INIT"), Handshake::Unknown);
        assert_eq!(Handshake::parse(""), Handshake::Unknown);
    }

    #[test]
    fn event_wire_format() {
        let event = MutationEvent::new(7, 12, "JOHN SMITH");
        assert_eq!(event.to_json().unwrap(), r#"{"id":7,"value":12,"name":"JOHN SMITH"}"#);
    }

    #[test]
    fn malformed_payloads_fail_to_decode() {
        assert!(MutationEvent::from_json("not json").is_err());
        assert!(MutationEvent::from_json(r#"{"id":"1","value":2,"name":"A"}"#).is_err());
        assert!(MutationEvent::from_json(r#"{"id":1,"name":"A"}"#).is_err());
        assert!(MutationEvent::from_json(r#"{"id":1.5,"value":2,"name":"A"}"#).is_err());
    }
}
