//! Discount create/edit form
//!
//! Holds operator input as typed in, validates it without touching the
//! backend and turns it into a [`DiscountPayload`].

use std::borrow::Cow;
use std::collections::HashSet;

use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Discount, DiscountPayload, DiscountType};
use shared::types::EntityId;
use shared::util::parse_local_datetime;
use validator::{Validate, ValidationError, ValidationErrors};

/// `datetime-local` input format
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Which targets a discount applies to
///
/// Exactly one scope is active; the id lists of the others are dropped
/// when the payload is built. Dealer targeting is independent of scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiscountScope {
    /// Every product
    #[default]
    General,
    /// Selected products and/or variants
    Products,
    /// Selected categories
    Categories,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct DiscountForm {
    #[validate(custom(function = "not_blank", message = "Discount name is required"))]
    pub name: String,
    pub description: String,
    pub discount_type: DiscountType,
    #[validate(custom(function = "positive_amount"))]
    pub discount_value: Decimal,
    /// `YYYY-MM-DDTHH:MM` or with seconds
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
    pub scope: DiscountScope,
    pub product_ids: Vec<EntityId>,
    pub variant_ids: Vec<EntityId>,
    pub category_ids: Vec<EntityId>,
    pub dealer_ids: Vec<EntityId>,
    pub minimum_order_amount: Option<Decimal>,
    pub maximum_discount_amount: Option<Decimal>,
    #[validate(range(min = 1, message = "Usage limit must be at least 1"))]
    pub usage_limit: Option<u32>,
    #[validate(range(min = 1, message = "Usage limit per customer must be at least 1"))]
    pub usage_limit_per_customer: Option<u32>,
    #[validate(length(max = 64, message = "Discount code is too long"))]
    pub discount_code: Option<String>,
    #[validate(range(min = 0, message = "Priority cannot be negative"))]
    pub priority: Option<i32>,
    pub stackable: bool,
    pub auto_apply: bool,
}

impl Default for DiscountForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::ZERO,
            start_date: String::new(),
            end_date: String::new(),
            is_active: true,
            scope: DiscountScope::General,
            product_ids: Vec::new(),
            variant_ids: Vec::new(),
            category_ids: Vec::new(),
            dealer_ids: Vec::new(),
            minimum_order_amount: None,
            maximum_discount_amount: None,
            usage_limit: None,
            usage_limit_per_customer: None,
            discount_code: None,
            priority: None,
            stackable: false,
            auto_apply: false,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("positive")
            .with_message(Cow::Borrowed("Discount value must be greater than zero")));
    }
    Ok(())
}

/// Field order used to pick the error reported to the operator
const FIELD_ORDER: &[&str] = &[
    "name",
    "discount_value",
    "usage_limit",
    "usage_limit_per_customer",
    "discount_code",
    "priority",
];

/// First field error as an [`AppError`]
fn first_field_error(errors: &ValidationErrors) -> AppError {
    let fields = errors.field_errors();
    let mut failing: Vec<(String, String)> = fields
        .iter()
        .filter_map(|(field, errs)| {
            let err = errs.first()?;
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            Some((field.to_string(), message))
        })
        .collect();
    failing.sort_by_key(|(field, _)| {
        FIELD_ORDER
            .iter()
            .position(|f| *f == field.as_str())
            .unwrap_or(FIELD_ORDER.len())
    });

    match failing.into_iter().next() {
        Some((field, message)) => {
            let code = if field == "name" {
                ErrorCode::RequiredField
            } else if field == "discount_value" {
                ErrorCode::DiscountInvalidValue
            } else {
                ErrorCode::ValidationFailed
            };
            AppError::with_message(code, message).with_detail("field", field)
        }
        None => AppError::validation(errors.to_string()),
    }
}

/// Keep the first occurrence of each id
fn unique(ids: &[EntityId]) -> Vec<EntityId> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn relation_ids<T>(rows: &Option<Vec<T>>, id: impl Fn(&T) -> EntityId) -> Vec<EntityId> {
    rows.as_deref()
        .map(|rows| rows.iter().map(id).collect())
        .unwrap_or_default()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl DiscountForm {
    /// Prefill from an existing discount
    pub fn from_discount(discount: &Discount) -> Self {
        let product_ids = relation_ids(&discount.applicable_products, |p| p.id);
        let variant_ids = relation_ids(&discount.applicable_variants, |v| v.id);
        let category_ids = relation_ids(&discount.applicable_categories, |c| c.id);
        let dealer_ids = relation_ids(&discount.applicable_dealers, |d| d.id);

        let scope = if !product_ids.is_empty() || !variant_ids.is_empty() {
            DiscountScope::Products
        } else if !category_ids.is_empty() {
            DiscountScope::Categories
        } else {
            DiscountScope::General
        };

        let input = |dt: Option<chrono::NaiveDateTime>| {
            dt.map(|d| d.format(INPUT_FORMAT).to_string())
                .unwrap_or_default()
        };

        Self {
            name: discount.name.clone(),
            description: discount.description.clone().unwrap_or_default(),
            discount_type: discount.discount_type,
            discount_value: discount.discount_value,
            start_date: input(discount.start_date),
            end_date: input(discount.end_date),
            is_active: discount.is_active,
            scope,
            product_ids,
            variant_ids,
            category_ids,
            dealer_ids,
            minimum_order_amount: discount.minimum_order_amount,
            maximum_discount_amount: discount.maximum_discount_amount,
            usage_limit: discount.usage_limit,
            usage_limit_per_customer: discount.usage_limit_per_customer,
            discount_code: discount.discount_code.clone(),
            priority: discount.priority,
            stackable: discount.stackable.unwrap_or(false),
            auto_apply: discount.auto_apply.unwrap_or(false),
        }
    }

    /// Validate and build the request payload
    pub fn to_payload(&self) -> AppResult<DiscountPayload> {
        self.validate().map_err(|e| first_field_error(&e))?;

        if self.discount_type == DiscountType::Percentage
            && self.discount_value > Decimal::ONE_HUNDRED
        {
            return Err(AppError::with_message(
                ErrorCode::DiscountInvalidValue,
                "Percentage discounts cannot exceed 100",
            )
            .with_detail("field", "discount_value"));
        }

        let start_date = parse_local_datetime(&self.start_date).map_err(|_| {
            AppError::with_message(ErrorCode::DiscountInvalidPeriod, "Start date is invalid")
                .with_detail("field", "start_date")
        })?;
        let end_date = parse_local_datetime(&self.end_date).map_err(|_| {
            AppError::with_message(ErrorCode::DiscountInvalidPeriod, "End date is invalid")
                .with_detail("field", "end_date")
        })?;
        if end_date <= start_date {
            return Err(AppError::with_message(
                ErrorCode::DiscountInvalidPeriod,
                "End date must be after start date",
            )
            .with_detail("field", "end_date"));
        }

        for (field, amount) in [
            ("minimum_order_amount", self.minimum_order_amount),
            ("maximum_discount_amount", self.maximum_discount_amount),
        ] {
            if amount.is_some_and(|a| a < Decimal::ZERO) {
                return Err(AppError::with_message(
                    ErrorCode::ValueOutOfRange,
                    "Amounts cannot be negative",
                )
                .with_detail("field", field));
            }
        }

        let (product_ids, variant_ids, category_ids) = match self.scope {
            DiscountScope::General => (Vec::new(), Vec::new(), Vec::new()),
            DiscountScope::Products => {
                if self.product_ids.is_empty() && self.variant_ids.is_empty() {
                    return Err(AppError::with_message(
                        ErrorCode::DiscountScopeEmpty,
                        "Select at least one product or variant",
                    ));
                }
                (unique(&self.product_ids), unique(&self.variant_ids), Vec::new())
            }
            DiscountScope::Categories => {
                if self.category_ids.is_empty() {
                    return Err(AppError::with_message(
                        ErrorCode::DiscountScopeEmpty,
                        "Select at least one category",
                    ));
                }
                (Vec::new(), Vec::new(), unique(&self.category_ids))
            }
        };

        Ok(DiscountPayload {
            name: self.name.trim().to_string(),
            description: non_empty(&self.description),
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            start_date,
            end_date,
            is_active: self.is_active,
            applicable_product_ids: product_ids,
            applicable_variant_ids: variant_ids,
            applicable_category_ids: category_ids,
            applicable_dealer_ids: unique(&self.dealer_ids),
            minimum_order_amount: self.minimum_order_amount,
            maximum_discount_amount: self.maximum_discount_amount,
            usage_limit: self.usage_limit,
            usage_limit_per_customer: self.usage_limit_per_customer,
            discount_code: self.discount_code.as_deref().and_then(non_empty),
            priority: self.priority,
            stackable: self.stackable,
            auto_apply: self.auto_apply,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_form() -> DiscountForm {
        DiscountForm {
            name: "Spring bulk".into(),
            discount_value: Decimal::new(15, 0),
            start_date: "2026-05-01T00:00".into(),
            end_date: "2026-05-31T23:59".into(),
            ..DiscountForm::default()
        }
    }

    #[test]
    fn test_general_scope_clears_every_target_list() {
        let form = DiscountForm {
            product_ids: vec![1],
            variant_ids: vec![2],
            category_ids: vec![3],
            dealer_ids: vec![9, 9, 10],
            ..valid_form()
        };
        let payload = form.to_payload().unwrap();
        assert!(payload.applicable_product_ids.is_empty());
        assert!(payload.applicable_variant_ids.is_empty());
        assert!(payload.applicable_category_ids.is_empty());
        assert_eq!(payload.applicable_dealer_ids, vec![9, 10]);
    }

    #[test]
    fn test_product_scope_clears_categories() {
        let form = DiscountForm {
            scope: DiscountScope::Products,
            product_ids: vec![5, 6, 5],
            category_ids: vec![3],
            ..valid_form()
        };
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.applicable_product_ids, vec![5, 6]);
        assert!(payload.applicable_category_ids.is_empty());
    }

    #[test]
    fn test_category_scope_clears_products_and_variants() {
        let form = DiscountForm {
            scope: DiscountScope::Categories,
            product_ids: vec![5],
            variant_ids: vec![7],
            category_ids: vec![3],
            ..valid_form()
        };
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.applicable_category_ids, vec![3]);
        assert!(payload.applicable_product_ids.is_empty());
        assert!(payload.applicable_variant_ids.is_empty());
    }

    #[test]
    fn test_empty_scope_rejected() {
        let form = DiscountForm {
            scope: DiscountScope::Products,
            ..valid_form()
        };
        let err = form.to_payload().unwrap_err();
        assert_eq!(err.code, ErrorCode::DiscountScopeEmpty);

        let variants_only = DiscountForm {
            scope: DiscountScope::Products,
            variant_ids: vec![7],
            ..valid_form()
        };
        assert!(variants_only.to_payload().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let form = DiscountForm {
            name: "   ".into(),
            ..valid_form()
        };
        let err = form.to_payload().unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "Discount name is required");
        assert!(err.is_validation());
    }

    #[test]
    fn test_value_rules() {
        let zero = DiscountForm {
            discount_value: Decimal::ZERO,
            ..valid_form()
        };
        assert_eq!(
            zero.to_payload().unwrap_err().message,
            "Discount value must be greater than zero"
        );

        let too_much = DiscountForm {
            discount_value: Decimal::new(101, 0),
            ..valid_form()
        };
        assert_eq!(
            too_much.to_payload().unwrap_err().code,
            ErrorCode::DiscountInvalidValue
        );

        let fixed = DiscountForm {
            discount_type: DiscountType::FixedAmount,
            discount_value: Decimal::new(250, 0),
            ..valid_form()
        };
        assert!(fixed.to_payload().is_ok());
    }

    #[test]
    fn test_period_rules() {
        let reversed = DiscountForm {
            start_date: "2026-06-01T00:00".into(),
            end_date: "2026-05-01T00:00".into(),
            ..valid_form()
        };
        assert_eq!(
            reversed.to_payload().unwrap_err().message,
            "End date must be after start date"
        );

        let garbage = DiscountForm {
            start_date: "tomorrow".into(),
            ..valid_form()
        };
        assert_eq!(
            garbage.to_payload().unwrap_err().code,
            ErrorCode::DiscountInvalidPeriod
        );
    }

    #[test]
    fn test_datetime_local_is_padded() {
        let payload = valid_form().to_payload().unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["startDate"], "2026-05-01T00:00:00");
        assert_eq!(json["endDate"], "2026-05-31T23:59:00");
    }

    #[test]
    fn test_limits() {
        let form = DiscountForm {
            usage_limit: Some(0),
            ..valid_form()
        };
        assert_eq!(
            form.to_payload().unwrap_err().message,
            "Usage limit must be at least 1"
        );

        let negative = DiscountForm {
            minimum_order_amount: Some(Decimal::new(-1, 0)),
            ..valid_form()
        };
        assert_eq!(
            negative.to_payload().unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
    }

    #[test]
    fn test_blank_optional_text_is_dropped() {
        let form = DiscountForm {
            description: "  ".into(),
            discount_code: Some(" ".into()),
            ..valid_form()
        };
        let payload = form.to_payload().unwrap();
        assert!(payload.description.is_none());
        assert!(payload.discount_code.is_none());
    }

    #[test]
    fn test_from_discount_infers_scope() {
        let discount: Discount = serde_json::from_value(json!({
            "id": 4,
            "name": "Fasteners",
            "discountType": "FIXED_AMOUNT",
            "discountValue": 3.5,
            "startDate": "2026-05-01T08:30:00",
            "endDate": "2026-05-10T18:00:00",
            "isActive": true,
            "applicableCategories": [{ "id": 12, "name": "Bolts" }],
            "applicableDealers": [{ "id": 9, "name": "North" }],
            "stackable": true
        }))
        .unwrap();

        let form = DiscountForm::from_discount(&discount);
        assert_eq!(form.scope, DiscountScope::Categories);
        assert_eq!(form.category_ids, vec![12]);
        assert_eq!(form.dealer_ids, vec![9]);
        assert_eq!(form.start_date, "2026-05-01T08:30");
        assert!(form.stackable);

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.discount_value, Decimal::new(35, 1));
    }
}
