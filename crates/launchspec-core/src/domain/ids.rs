//! App identifiers.
//!
//! The id is a plain string on the wire (users type it into the form), so
//! `AppId` is a thin newtype rather than a parsed ULID. Generated ids carry
//! the `app_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix used by every generated id.
pub const APP_ID_PREFIX: &str = "app_";

/// Identifier of an App (unique within the owning collection).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for AppId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AppId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for AppId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_id_serializes_as_plain_string() {
        let id = AppId::new("app_7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""app_7""#);

        let back: AppId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn display_has_no_decoration() {
        assert_eq!(AppId::from("web").to_string(), "web");
    }
}
