//! Client-related types
//!
//! Operator identity as known to the console. Authentication itself is
//! handled elsewhere; the console only keeps what the backend reported.

use serde::{Deserialize, Serialize};

use crate::types::Permission;

/// Operator information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl UserInfo {
    /// Whether any held permission grants `action`
    pub fn can(&self, action: &str) -> bool {
        self.permissions
            .iter()
            .any(|p| Permission::new(p.as_str()).grants(action))
    }
}
