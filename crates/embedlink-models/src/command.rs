//! Host → widget command messages.
//!
//! Commands are serialized as JSON strings and posted across the window
//! boundary to the embedded widget. Two commands exist: `login` (carries a
//! session token) and `logout` (carries no payload).
//!
//! The widget acknowledges exactly one event — [`EMBED_READY`](crate::event::EMBED_READY)
//! — and the reply shape lives here as [`HostAck`].

use serde::{Deserialize, Serialize};

use crate::event::EMBED_READY;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Payload of a `login` command.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginData {
    /// Opaque session token issued by the token exchange service.
    ///
    /// The token is forwarded verbatim; the host never parses or
    /// validates it.
    pub token: String,
}

/// A command sent from the host page to the embedded widget.
///
/// Wire shape (adjacently tagged):
///
/// ```text
/// {"action":"login","data":{"token":"…"}}
/// {"action":"logout"}
/// ```
///
/// # Examples
///
/// ```
/// use embedlink_models::Command;
///
/// let json = serde_json::to_string(&Command::logout()).unwrap();
/// assert_eq!(json, r#"{"action":"logout"}"#);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "action", content = "data", rename_all = "lowercase")]
pub enum Command {
    /// Instruct the widget to authenticate with the given session token.
    Login(LoginData),
    /// Instruct the widget to end the current session.
    Logout,
}

impl Command {
    /// Build a `login` command carrying `token`.
    pub fn login(token: impl Into<String>) -> Self {
        Self::Login(LoginData {
            token: token.into(),
        })
    }

    /// Build a `logout` command.
    pub fn logout() -> Self {
        Self::Logout
    }

    /// The wire name of this command's action (`"login"` / `"logout"`).
    pub fn action(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Logout => "logout",
        }
    }
}

// ---------------------------------------------------------------------------
// HostAck
// ---------------------------------------------------------------------------

/// Host → widget acknowledgment of a received event.
///
/// The protocol requires exactly one ack, in reply to `EMBED_READY`:
///
/// ```text
/// {"type":"ack","receivedType":"EMBED_READY"}
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum HostAck {
    /// Confirms receipt of the event named in `received_type`.
    #[serde(rename = "ack", rename_all = "camelCase")]
    Ack {
        /// The `type` discriminant of the acknowledged event.
        received_type: String,
    },
}

impl HostAck {
    /// The ack sent in reply to `EMBED_READY`.
    pub fn embed_ready() -> Self {
        Self::Ack {
            received_type: EMBED_READY.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_wire_shape() {
        let json = serde_json::to_string(&Command::login("T1")).unwrap();
        assert_eq!(json, r#"{"action":"login","data":{"token":"T1"}}"#);
    }

    #[test]
    fn logout_wire_shape() {
        let json = serde_json::to_string(&Command::logout()).unwrap();
        assert_eq!(json, r#"{"action":"logout"}"#);
    }

    #[test]
    fn logout_roundtrip_is_identity() {
        // A logout command serialized then deserialized by the widget
        // must decode to an identical structure.
        let cmd = Command::logout();
        let json = serde_json::to_string(&cmd).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
    }

    #[test]
    fn login_roundtrip_preserves_token() {
        let cmd = Command::login("abc");
        let json = serde_json::to_string(&cmd).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
        match back {
            Command::Login(data) => assert_eq!(data.token, "abc"),
            Command::Logout => panic!("expected login"),
        }
    }

    #[test]
    fn login_without_data_is_rejected() {
        // The widget treats a `login` with no token as malformed.
        let result = serde_json::from_str::<Command>(r#"{"action":"login"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn action_names() {
        assert_eq!(Command::login("t").action(), "login");
        assert_eq!(Command::logout().action(), "logout");
    }

    #[test]
    fn ack_wire_shape() {
        let json = serde_json::to_string(&HostAck::embed_ready()).unwrap();
        assert_eq!(json, r#"{"type":"ack","receivedType":"EMBED_READY"}"#);
    }

    #[test]
    fn ack_roundtrip() {
        let ack = HostAck::embed_ready();
        let json = serde_json::to_string(&ack).unwrap();
        let back: HostAck = serde_json::from_str(&json).unwrap();
        assert_eq!(ack, back);
    }
}
