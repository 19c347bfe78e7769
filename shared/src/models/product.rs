//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::discount::ProductVariantSummary;
use crate::types::{EntityId, Identified};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub variants: Vec<ProductVariantSummary>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Identified for Product {
    fn id(&self) -> EntityId {
        self.id
    }
}

fn default_true() -> bool {
    true
}
