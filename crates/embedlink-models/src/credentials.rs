//! User identity claims forwarded to the token exchange service.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The role a user signs in with.
///
/// Serialized with capitalized variant names on the wire (`"User"`,
/// `"Admin"`), matching what the upstream authority expects.
///
/// # Examples
///
/// ```
/// use embedlink_models::Role;
/// use std::str::FromStr;
///
/// assert_eq!(Role::from_str("Admin").unwrap(), Role::Admin);
/// assert_eq!(Role::User.to_string(), "User");
/// ```
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
pub enum Role {
    /// A regular end user.
    User,
    /// An administrator.
    Admin,
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Identity claims entered on the host page.
///
/// Held in the host controller's state and sent verbatim to the token
/// exchange service; never posted to the widget directly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role claim.
    pub role: Role,
}

impl Credentials {
    /// Build credentials from the three claims.
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role,
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
    fn role_wire_names_are_capitalized() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""User""#);
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""Admin""#);
    }

    #[test]
    fn role_from_str() {
        assert_eq!(Role::from_str("User").unwrap(), Role::User);
        assert_eq!(Role::from_str("Admin").unwrap(), Role::Admin);
        assert!(Role::from_str("root").is_err());
    }

    #[test]
    fn role_enum_iter() {
        use strum::IntoEnumIterator;
        let variants: Vec<_> = Role::iter().collect();
        assert_eq!(variants, vec![Role::User, Role::Admin]);
    }

    #[test]
    fn credentials_serde_roundtrip() {
        let creds = Credentials::new("a@b.com", "A", Role::User);
        let json = serde_json::to_string(&creds).unwrap();
        assert_eq!(json, r#"{"email":"a@b.com","name":"A","role":"User"}"#);
        let back: Credentials = serde_json::from_str(&json).unwrap();
        assert_eq!(creds, back);
    }
}
