//! Error types for the `embedlink-models` crate.
//!
//! Validation helpers in this crate return variants of [`ProtocolError`].

/// Errors produced when validating protocol messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// An error-phase status event did not carry a human-readable message.
    #[error("error event for \"{action}\" is missing its message")]
    MissingErrorMessage {
        /// The action the event referred to.
        action: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ProtocolError::MissingErrorMessage {
            action: "login".into(),
        };
        assert_eq!(
            err.to_string(),
            "error event for \"login\" is missing its message"
        );
    }
}
