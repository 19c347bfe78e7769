//! Dealer Model

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Identified};

/// Login account belonging to a dealer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerUser {
    pub id: EntityId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Dealer entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub tax_number: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub users: Vec<DealerUser>,
}

impl Dealer {
    /// Drop a user from the in-memory dealer, returning whether it was present
    pub fn remove_user(&mut self, user_id: EntityId) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != user_id);
        self.users.len() != before
    }
}

impl Identified for Dealer {
    fn id(&self) -> EntityId {
        self.id
    }
}

fn default_true() -> bool {
    true
}
