//! Discount calculation preview

use hub_client::http::HttpClient;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DiscountCalculation, DiscountCalculationRequest};
use shared::types::EntityId;
use validator::Validate;

use super::{FetchOutcome, ViewCell, ViewContext, ViewState};

/// Operator input for a calculation
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CalculationInput {
    pub product_id: Option<EntityId>,
    pub dealer_id: Option<EntityId>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
    pub unit_price: Option<Decimal>,
}

impl CalculationInput {
    pub fn to_request(&self) -> AppResult<DiscountCalculationRequest> {
        let product_id = self
            .product_id
            .ok_or_else(|| AppError::required("Product"))?;
        let dealer_id = self.dealer_id.ok_or_else(|| AppError::required("Dealer"))?;

        if let Err(errors) = self.validate() {
            let message = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Quantity is invalid".to_string());
            return Err(AppError::with_message(ErrorCode::ValueOutOfRange, message)
                .with_detail("field", "quantity"));
        }
        if self.unit_price.is_some_and(|p| p < Decimal::ZERO) {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "Unit price cannot be negative",
            )
            .with_detail("field", "unit_price"));
        }

        Ok(DiscountCalculationRequest {
            product_id,
            dealer_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
        })
    }
}

#[derive(Debug)]
pub struct DiscountCalculateView<H> {
    ctx: ViewContext<H>,
    cell: ViewCell<DiscountCalculation>,
}

impl<H: HttpClient> DiscountCalculateView<H> {
    pub fn new(ctx: ViewContext<H>) -> Self {
        let cell = ViewCell::new("discount_calculation", ctx.alerts.clone());
        Self { ctx, cell }
    }

    async fn calculate_request(
        &self,
        request: DiscountCalculationRequest,
    ) -> AppResult<DiscountCalculation> {
        let result = self.ctx.api.calculate_discount(&request).await?;
        tracing::info!(
            product_id = request.product_id,
            dealer_id = request.dealer_id,
            applied = result.applied_discounts.len(),
            "Discount calculated"
        );
        Ok(result)
    }

    pub async fn calculate(&self, input: &CalculationInput) -> FetchOutcome {
        match input.to_request() {
            Ok(request) => self.cell.run(self.calculate_request(request)).await,
            Err(err) => self.cell.fail(err).await,
        }
    }

    pub async fn state(&self) -> ViewState<DiscountCalculation> {
        self.cell.state().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_targets() {
        let input = CalculationInput {
            dealer_id: Some(9),
            quantity: 1,
            ..Default::default()
        };
        assert_eq!(input.to_request().unwrap_err().message, "Product is required");

        let input = CalculationInput {
            product_id: Some(5),
            quantity: 1,
            ..Default::default()
        };
        assert_eq!(input.to_request().unwrap_err().message, "Dealer is required");
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let input = CalculationInput {
            product_id: Some(5),
            dealer_id: Some(9),
            quantity: 0,
            unit_price: None,
        };
        let err = input.to_request().unwrap_err();
        assert_eq!(err.message, "Quantity must be at least 1");
        assert!(err.is_validation());
    }

    #[test]
    fn test_valid_request() {
        let input = CalculationInput {
            product_id: Some(5),
            dealer_id: Some(9),
            quantity: 4,
            unit_price: Some(Decimal::new(1250, 2)),
        };
        let request = input.to_request().unwrap();
        assert_eq!(request.quantity, 4);
        assert_eq!(request.unit_price, Some(Decimal::new(1250, 2)));
    }
}
