// ABOUTME: Session and permission types shared across Flashdeck packages
// ABOUTME: Wire-compatible with the server's session header and login response

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Persisted credential and identity state for the current client.
///
/// Serialized as-is into the `Authorization` header of every API request.
/// A lapsed session keeps a record with only `expired` set so the UI can
/// tell "your session expired" apart from "you are logged out".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
}

impl SessionRecord {
    /// Session created by a successful login
    pub fn authenticated(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
            expired: None,
        }
    }

    /// Marker left behind when the server reports the token as expired
    pub fn lapsed() -> Self {
        Self {
            token: None,
            username: None,
            expired: Some(true),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expired.unwrap_or(false)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && !self.is_expired()
    }
}

#[derive(Debug, Error)]
#[error("Unknown permission: {0}")]
pub struct PermissionParseError(pub String);

/// Permission granted to a person by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Permission {
    User,
    Admin,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::User => "USER",
            Permission::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = PermissionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USER" => Ok(Permission::User),
            "ADMIN" => Ok(Permission::Admin),
            _ => Err(PermissionParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lapsed_session_serializes_only_expired_flag() {
        let json = serde_json::to_string(&SessionRecord::lapsed()).unwrap();
        assert_eq!(json, r#"{"expired":true}"#);
    }

    #[test]
    fn test_missing_session_serializes_as_null() {
        let json = serde_json::to_string(&None::<SessionRecord>).unwrap();
        assert_eq!(json, "null");
    }

    #[test]
    fn test_session_state_flags() {
        let session = SessionRecord::authenticated("abc", "alice");
        assert!(session.is_authenticated());
        assert!(!session.is_expired());

        let lapsed = SessionRecord::lapsed();
        assert!(lapsed.is_expired());
        assert!(!lapsed.is_authenticated());
        assert!(!SessionRecord::default().is_authenticated());
    }

    #[test]
    fn test_permission_round_trip_names() {
        assert_eq!("admin".parse::<Permission>().unwrap(), Permission::Admin);
        assert_eq!(Permission::User.to_string(), "USER");
        assert!("root".parse::<Permission>().is_err());

        let parsed: Vec<Permission> = serde_json::from_str(r#"["USER","ADMIN"]"#).unwrap();
        assert_eq!(parsed, vec![Permission::User, Permission::Admin]);
    }
}
