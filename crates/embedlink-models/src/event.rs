//! Widget → host event messages.
//!
//! The widget reports its lifecycle through two event shapes: a single
//! `EMBED_READY` once its own initialization finishes, and `embed-login`
//! status reports while processing `login` / `logout` commands.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Wire discriminant of the readiness event.
pub const EMBED_READY: &str = "EMBED_READY";

// ---------------------------------------------------------------------------
// LoginAction / LoginPhase
// ---------------------------------------------------------------------------

/// The command a status report refers to.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LoginAction {
    /// The report concerns a `login` command.
    Login,
    /// The report concerns a `logout` command.
    Logout,
}

/// Progress of a login or logout attempt.
///
/// The widget emits `init` immediately on receiving a command, then
/// exactly one of `success` or `error` once the attempt settles.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LoginPhase {
    /// The widget accepted the command and started processing it.
    Init,
    /// The attempt completed successfully.
    Success,
    /// The attempt failed; the event carries a human-readable message.
    Error,
}

// ---------------------------------------------------------------------------
// WidgetEvent
// ---------------------------------------------------------------------------

/// An event emitted by the embedded widget.
///
/// Wire shapes (internally tagged on `type`):
///
/// ```text
/// {"type":"EMBED_READY"}
/// {"type":"embed-login","action":"login","status":"success"}
/// {"type":"embed-login","action":"login","status":"error","message":"…"}
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum WidgetEvent {
    /// The widget finished initializing. Emitted exactly once, with no
    /// payload beyond the discriminant.
    #[serde(rename = "EMBED_READY")]
    Ready,

    /// Progress report for a login or logout attempt.
    #[serde(rename = "embed-login")]
    LoginStatus {
        /// Which command the report concerns.
        action: LoginAction,
        /// Progress of the attempt.
        status: LoginPhase,
        /// Human-readable detail. Required when `status` is `error`.
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl WidgetEvent {
    /// Build an error-phase status report.
    pub fn login_error(action: LoginAction, message: impl Into<String>) -> Self {
        Self::LoginStatus {
            action,
            status: LoginPhase::Error,
            message: Some(message.into()),
        }
    }

    /// Check the protocol invariant: every event except `EMBED_READY`
    /// carries an action and a status (guaranteed by the type), and
    /// error-phase events must carry a message.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        match self {
            Self::LoginStatus {
                action,
                status: LoginPhase::Error,
                message: None,
            } => Err(ProtocolError::MissingErrorMessage {
                action: action.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn ready_wire_shape() {
        let json = serde_json::to_string(&WidgetEvent::Ready).unwrap();
        assert_eq!(json, r#"{"type":"EMBED_READY"}"#);
    }

    #[test]
    fn login_status_wire_shape() {
        let event = WidgetEvent::LoginStatus {
            action: LoginAction::Login,
            status: LoginPhase::Success,
            message: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"type":"embed-login","action":"login","status":"success"}"#
        );
    }

    #[test]
    fn error_event_carries_message() {
        let event = WidgetEvent::login_error(LoginAction::Login, "invalid-message");
        let json = serde_json::to_string(&event).unwrap();
        let back: WidgetEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        assert!(back.validate().is_ok());
    }

    #[test]
    fn error_event_without_message_is_invalid() {
        let event = WidgetEvent::LoginStatus {
            action: LoginAction::Logout,
            status: LoginPhase::Error,
            message: None,
        };
        assert!(event.validate().is_err());
    }

    #[test]
    fn non_error_events_validate() {
        assert!(WidgetEvent::Ready.validate().is_ok());
        let init = WidgetEvent::LoginStatus {
            action: LoginAction::Login,
            status: LoginPhase::Init,
            message: None,
        };
        assert!(init.validate().is_ok());
    }

    #[test]
    fn phase_display_and_from_str() {
        assert_eq!(LoginPhase::Init.to_string(), "init");
        assert_eq!(LoginPhase::Success.to_string(), "success");
        assert_eq!(LoginPhase::Error.to_string(), "error");
        assert_eq!(LoginPhase::from_str("success").unwrap(), LoginPhase::Success);
        assert!(LoginPhase::from_str("pending").is_err());
    }

    #[test]
    fn action_display_and_from_str() {
        assert_eq!(LoginAction::Login.to_string(), "login");
        assert_eq!(LoginAction::from_str("logout").unwrap(), LoginAction::Logout);
    }

    #[test]
    fn event_serde_roundtrip() {
        let event = WidgetEvent::LoginStatus {
            action: LoginAction::Logout,
            status: LoginPhase::Init,
            message: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: WidgetEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
