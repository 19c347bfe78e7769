//! Role Model

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Identified};

/// Role entity (RBAC)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Permission slugs (e.g. `["discounts:read", "dealers:*"]`)
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Identified for Role {
    fn id(&self) -> EntityId {
        self.id
    }
}
