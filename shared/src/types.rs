//! Common types for the shared crate

use serde::{Deserialize, Serialize};

/// Backend-assigned entity id
pub type EntityId = i64;

/// Anything carrying a stable backend id.
///
/// Used by the console's reconciliation helpers to merge result sets.
pub trait Identified {
    fn id(&self) -> EntityId;
}

/// Permission slug (e.g. `discounts:write`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(pub String);

impl Permission {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Check if this permission grants access to the given action
    ///
    /// `all` and `*` grant everything, `module:*` grants every action of the
    /// module.
    pub fn grants(&self, action: &str) -> bool {
        if self.0 == "*" || self.0 == "all" {
            return true;
        }
        if let Some(prefix) = self.0.strip_suffix(":*") {
            return action
                .split_once(':')
                .is_some_and(|(module, _)| module == prefix);
        }
        self.0 == action
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Permission {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
