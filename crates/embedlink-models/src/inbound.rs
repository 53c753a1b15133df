//! Loosely-shaped inbound frames and canonical-tag normalization.
//!
//! Frames arriving over the window boundary are not guaranteed to be
//! well-formed [`WidgetEvent`](crate::event::WidgetEvent)s: the transport
//! delivers whatever the embedded document posts, as either a JSON string
//! or a native object. [`Inbound`] decodes the loose shape, and
//! [`Inbound::canonical_tag`] collapses the two possible discriminant
//! fields (`status`, `type`) into a single [`Tag`] before dispatch.

use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// A decoded inbound frame, before dispatch.
///
/// All fields are optional; unknown fields are ignored. The frame is
/// interpreted through [`canonical_tag`](Self::canonical_tag).
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Inbound {
    /// The `type` discriminant, when present (`"EMBED_READY"`,
    /// `"embed-login"`, …).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// The `status` discriminant, when present. Takes precedence over
    /// `type` during normalization.
    pub status: Option<String>,
    /// The command the frame refers to (`"login"` / `"logout"`).
    pub action: Option<String>,
    /// Human-readable detail, carried by status and error frames.
    pub message: Option<String>,
    /// Alternative error detail field used by some widget builds.
    pub error: Option<String>,
}

impl Inbound {
    /// Decode a frame delivered as either a JSON string or a native
    /// JSON object.
    ///
    /// A string payload is parsed as JSON; any other payload is
    /// interpreted structurally. Anything that is not (or does not
    /// contain) an object fails with a deserialization error.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::String(raw) => serde_json::from_str(raw),
            other => serde_json::from_value(other.clone()),
        }
    }

    /// Compute the single canonical discriminant for dispatch:
    /// `status` when present, else `type`.
    pub fn canonical_tag(&self) -> Tag {
        let raw = self
            .status
            .as_deref()
            .or(self.kind.as_deref())
            .unwrap_or_default();
        Tag::from_raw(raw)
    }

    /// The detail string of an error frame: `message` if present, else
    /// `error`.
    pub fn error_detail(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Tag
// ---------------------------------------------------------------------------

/// Canonical discriminant of an inbound frame.
///
/// Frames that normalize to [`Other`](Self::Other) are ignored by
/// dispatch; this keeps the protocol forward-compatible with widget
/// builds that emit additional frame kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// The widget finished initializing (`type: "EMBED_READY"`).
    EmbedReady,
    /// The widget asks the host to authenticate it.
    AuthRequest,
    /// The widget reports successful authentication.
    AuthSuccess,
    /// The widget reports failed authentication.
    AuthFailure,
    /// The widget UI is ready; clears the host's loading state.
    Ready,
    /// A command settled successfully.
    Success,
    /// A command or the widget itself failed.
    Error,
    /// Any discriminant outside the recognized set.
    Other(String),
}

impl Tag {
    /// Map a raw discriminant string to its canonical tag.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "EMBED_READY" => Self::EmbedReady,
            "auth_request" => Self::AuthRequest,
            "auth_success" => Self::AuthSuccess,
            "auth_failure" => Self::AuthFailure,
            "ready" => Self::Ready,
            "success" => Self::Success,
            "error" => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
