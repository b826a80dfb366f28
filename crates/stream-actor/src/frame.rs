//! # Wire Frames
//!
//! Every unit delivered to a subscriber is a [`Frame`]: a connection
//! acknowledgment, a real event, or a keepalive. Each frame is a discrete,
//! independently parseable unit, and the keepalive carries an explicit
//! `type` marker so receivers never have to infer it from missing fields.

use serde::{Deserialize, Serialize};

/// One unit on a subscriber's stream.
///
/// Serializes internally tagged, e.g.:
///
/// ```json
/// {"type": "connected"}
/// {"type": "event", "status": "paid", ...}
/// {"type": "keepalive"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame<E> {
    /// First frame on every subscription: "registered and first byte flushed".
    Connected,
    /// An accepted change, broadcast to every live subscriber.
    Event(E),
    /// Periodic no-payload frame used to detect half-open connections.
    Keepalive,
}

impl<E> Frame<E> {
    /// Returns the event payload, if this is an event frame.
    pub fn into_event(self) -> Option<E> {
        match self {
            Frame::Event(e) => Some(e),
            _ => None,
        }
    }

    /// True for keepalive frames.
    pub fn is_keepalive(&self) -> bool {
        matches!(self, Frame::Keepalive)
    }
}
