//! The window-messaging transport seam.
//!
//! The host page and the widget run in isolated execution contexts and
//! share no memory; everything crosses the boundary as serialized
//! fire-and-forget messages.  [`WidgetTransport`] abstracts the outgoing
//! half (an iframe's `postMessage` in a browser shell); incoming frames
//! are modeled as [`WindowFrame`]s and fed to the controller.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HostError;

/// Outgoing half of the window-messaging boundary.
///
/// `post` is fire-and-forget: a successful return means the frame was
/// handed to the transport, not that the widget received or processed
/// it.  There is no delivery guarantee and no ordering guarantee beyond
/// same-sender FIFO.
pub trait WidgetTransport: Send + Sync {
    /// Post a serialized frame to the widget's window.
    ///
    /// `target_origin` is the origin the frame is pinned to;
    /// [`WILDCARD_ORIGIN`](crate::origin::WILDCARD_ORIGIN) is accepted
    /// as "any".
    fn post(&self, payload: &str, target_origin: &str) -> Result<(), HostError>;
}

/// An incoming frame from the window boundary.
///
/// Carries the sender's origin (as reported by the transport, not by
/// the frame content) and the raw payload, which may be a JSON string
/// or a native object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WindowFrame {
    /// Origin of the sending document.
    pub origin: String,
    /// Raw message payload.
    pub payload: Value,
}

impl WindowFrame {
    /// Build a frame from an origin and payload.
    pub fn new(origin: impl Into<String>, payload: Value) -> Self {
        Self {
            origin: origin.into(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn frame_roundtrip() {
        let frame = WindowFrame::new("https://widget.example.com", json!({"type": "EMBED_READY"}));
        let json = serde_json::to_string(&frame).unwrap();
        let back: WindowFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame, back);
    }
}
