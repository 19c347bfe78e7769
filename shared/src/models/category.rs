//! Category Model

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Identified};

/// Product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<EntityId>,
}

impl Identified for Category {
    fn id(&self) -> EntityId {
        self.id
    }
}
