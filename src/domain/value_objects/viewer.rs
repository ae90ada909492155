//! Viewer identity - who is looking at a world

use serde::{Deserialize, Serialize};

use super::UserId;

/// The identity of the current viewer as established by the external auth platform.
///
/// Derived fresh for every request; never stored as ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "user_id", rename_all = "snake_case")]
pub enum Viewer {
    #[default]
    Anonymous,
    Authenticated(UserId),
}

impl Viewer {
    /// Build a viewer from a raw header value. Blank or malformed values are anonymous.
    pub fn from_header_value(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(value) => match UserId::parse(value) {
                Ok(id) => Viewer::Authenticated(id),
                Err(_) => {
                    tracing::debug!("Ignoring malformed viewer id: {}", value);
                    Viewer::Anonymous
                }
            },
            None => Viewer::Anonymous,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Authenticated(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Viewer::Authenticated(_))
    }
}

impl std::fmt::Display for Viewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Viewer::Anonymous => write!(f, "anonymous"),
            Viewer::Authenticated(id) => write!(f, "user:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_value_parsing() {
        let id = UserId::new();
        assert_eq!(
            Viewer::from_header_value(Some(&id.to_string())),
            Viewer::Authenticated(id)
        );
        assert_eq!(
            Viewer::from_header_value(Some(&format!("  {}  ", id))),
            Viewer::Authenticated(id)
        );
        assert_eq!(Viewer::from_header_value(None), Viewer::Anonymous);
        assert_eq!(Viewer::from_header_value(Some("   ")), Viewer::Anonymous);
        assert_eq!(Viewer::from_header_value(Some("not-a-uuid")), Viewer::Anonymous);
    }
}
