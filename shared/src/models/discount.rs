//! Discount Model

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Identified};

/// Discount type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percentage,
    FixedAmount,
}

/// Lifecycle status reported by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountStatus {
    Active,
    Inactive,
    Scheduled,
    Expired,
    /// Soft-deleted, restorable
    Deleted,
    #[serde(other)]
    Unknown,
}

/// Product projection embedded in a discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountProduct {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Dealer projection embedded in a discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountDealer {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Category projection embedded in a discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCategory {
    pub id: EntityId,
    pub name: String,
}

/// Variant projection embedded in a discount or a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariantSummary {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub product_id: Option<EntityId>,
}

/// Discount entity
///
/// Relation arrays are `None` when the backend omits them; an omitted
/// relation never matches a scope filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub status: Option<DiscountStatus>,
    #[serde(default)]
    pub applicable_products: Option<Vec<DiscountProduct>>,
    #[serde(default)]
    pub applicable_dealers: Option<Vec<DiscountDealer>>,
    #[serde(default)]
    pub applicable_categories: Option<Vec<DiscountCategory>>,
    #[serde(default)]
    pub applicable_variants: Option<Vec<ProductVariantSummary>>,
    #[serde(default)]
    pub minimum_order_amount: Option<Decimal>,
    #[serde(default)]
    pub maximum_discount_amount: Option<Decimal>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub usage_limit_per_customer: Option<u32>,
    #[serde(default)]
    pub discount_code: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub stackable: Option<bool>,
    #[serde(default)]
    pub auto_apply: Option<bool>,
}

impl Discount {
    /// Whether the dealer relation contains `dealer_id`
    pub fn applies_to_dealer(&self, dealer_id: EntityId) -> bool {
        self.applicable_dealers
            .as_deref()
            .is_some_and(|dealers| dealers.iter().any(|d| d.id == dealer_id))
    }

    /// Whether the product relation contains `product_id`
    pub fn applies_to_product(&self, product_id: EntityId) -> bool {
        self.applicable_products
            .as_deref()
            .is_some_and(|products| products.iter().any(|p| p.id == product_id))
    }
}

impl Identified for Discount {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Create / update payload
///
/// Updates use full-replace semantics: the scope id arrays are recomputed
/// from the current selection every time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub discount_type: DiscountType,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_value: Decimal,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub is_active: bool,
    pub applicable_product_ids: Vec<EntityId>,
    pub applicable_variant_ids: Vec<EntityId>,
    pub applicable_category_ids: Vec<EntityId>,
    pub applicable_dealer_ids: Vec<EntityId>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub minimum_order_amount: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub maximum_discount_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit_per_customer: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    pub stackable: bool,
    pub auto_apply: bool,
}

/// `POST /discounts/calculate` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCalculationRequest {
    pub product_id: EntityId,
    pub dealer_id: EntityId,
    pub quantity: u32,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub unit_price: Option<Decimal>,
}

/// Discount applied by the backend during a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    pub discount_id: EntityId,
    pub discount_name: String,
    pub discount_amount: Decimal,
}

/// `POST /discounts/calculate` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCalculation {
    pub original_amount: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
    #[serde(default)]
    pub applied_discounts: Vec<AppliedDiscount>,
}

/// Search parameters for `GET /discounts/search`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountSearch {
    pub query: String,
    pub sort_by: String,
    pub sort_direction: SortDirection,
}

impl DiscountSearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            sort_by: "startDate".to_string(),
            sort_direction: SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_discount_deserialize_minimal() {
        let d: Discount = serde_json::from_value(json!({
            "id": 7,
            "name": "Spring",
            "discountType": "PERCENTAGE",
            "discountValue": 12.5,
            "startDate": "2026-03-01T00:00:00",
            "endDate": "2026-03-31T23:59:00",
            "isActive": true,
            "status": "SCHEDULED"
        }))
        .unwrap();
        assert_eq!(d.id, 7);
        assert_eq!(d.discount_type, DiscountType::Percentage);
        assert_eq!(d.discount_value, Decimal::new(125, 1));
        assert_eq!(d.status, Some(DiscountStatus::Scheduled));
        assert!(d.applicable_dealers.is_none());
        assert!(!d.applies_to_dealer(1));
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let d: Discount = serde_json::from_value(json!({
            "id": 1,
            "name": "x",
            "discountType": "FIXED_AMOUNT",
            "discountValue": 5,
            "status": "ARCHIVED_V2"
        }))
        .unwrap();
        assert_eq!(d.status, Some(DiscountStatus::Unknown));
    }

    #[test]
    fn test_relation_membership() {
        let d: Discount = serde_json::from_value(json!({
            "id": 1,
            "name": "x",
            "discountType": "FIXED_AMOUNT",
            "discountValue": 5,
            "applicableProducts": [{ "id": 5, "name": "Bolt" }],
            "applicableDealers": [{ "id": 9, "name": "North" }]
        }))
        .unwrap();
        assert!(d.applies_to_product(5));
        assert!(!d.applies_to_product(6));
        assert!(d.applies_to_dealer(9));
    }

    #[test]
    fn test_payload_serializes_numbers_and_camel_case() {
        let payload = DiscountPayload {
            name: "Bulk".into(),
            description: None,
            discount_type: DiscountType::FixedAmount,
            discount_value: Decimal::new(1050, 2),
            start_date: NaiveDateTime::parse_from_str("2026-01-01T10:00:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            end_date: NaiveDateTime::parse_from_str("2026-02-01T10:00:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            is_active: true,
            applicable_product_ids: vec![1, 2],
            applicable_variant_ids: vec![],
            applicable_category_ids: vec![],
            applicable_dealer_ids: vec![],
            minimum_order_amount: Some(Decimal::new(100, 0)),
            maximum_discount_amount: None,
            usage_limit: None,
            usage_limit_per_customer: None,
            discount_code: None,
            priority: Some(1),
            stackable: false,
            auto_apply: true,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["discountValue"], 10.5);
        assert_eq!(json["minimumOrderAmount"], 100.0);
        assert_eq!(json["startDate"], "2026-01-01T10:00:00");
        assert_eq!(json["applicableProductIds"], json!([1, 2]));
        assert!(json.get("maximumDiscountAmount").is_none());
        assert!(json.get("description").is_none());
    }
}
