//! Expired and upcoming discount views
//!
//! Both load on mount. Expired discounts can be restored, upcoming ones
//! deleted; either way the list is reloaded once afterwards.

use hub_client::http::HttpClient;
use shared::error::AppResult;
use shared::models::Discount;
use shared::types::EntityId;

use super::{FetchOutcome, ViewCell, ViewContext, ViewState};

#[derive(Debug)]
pub struct ExpiredDiscountsView<H> {
    ctx: ViewContext<H>,
    cell: ViewCell<Vec<Discount>>,
}

impl<H: HttpClient> ExpiredDiscountsView<H> {
    pub fn new(ctx: ViewContext<H>) -> Self {
        let cell = ViewCell::new("expired_discounts", ctx.alerts.clone());
        Self { ctx, cell }
    }

    async fn load_rows(&self) -> AppResult<Vec<Discount>> {
        let rows = self.ctx.api.expired_discounts().await?;
        tracing::info!(count = rows.len(), "Expired discounts loaded");
        Ok(rows)
    }

    /// Initial load
    pub async fn mount(&self) -> FetchOutcome {
        self.cell.run(self.load_rows()).await
    }

    pub async fn reload(&self) -> FetchOutcome {
        self.cell.run(self.load_rows()).await
    }

    pub async fn restore(&self, discount_id: EntityId) -> FetchOutcome {
        let ok = self
            .ctx
            .mutate("Discount restored", self.ctx.api.restore_discount(discount_id))
            .await;
        if !ok {
            return FetchOutcome::Failed;
        }
        self.reload().await
    }

    pub async fn state(&self) -> ViewState<Vec<Discount>> {
        self.cell.state().await
    }
}

#[derive(Debug)]
pub struct UpcomingDiscountsView<H> {
    ctx: ViewContext<H>,
    cell: ViewCell<Vec<Discount>>,
}

impl<H: HttpClient> UpcomingDiscountsView<H> {
    pub fn new(ctx: ViewContext<H>) -> Self {
        let cell = ViewCell::new("upcoming_discounts", ctx.alerts.clone());
        Self { ctx, cell }
    }

    async fn load_rows(&self) -> AppResult<Vec<Discount>> {
        let rows = self.ctx.api.upcoming_discounts().await?;
        tracing::info!(count = rows.len(), "Upcoming discounts loaded");
        Ok(rows)
    }

    pub async fn mount(&self) -> FetchOutcome {
        self.cell.run(self.load_rows()).await
    }

    pub async fn reload(&self) -> FetchOutcome {
        self.cell.run(self.load_rows()).await
    }

    pub async fn delete(&self, discount_id: EntityId) -> FetchOutcome {
        let ok = self
            .ctx
            .mutate("Discount deleted", self.ctx.api.delete_discount(discount_id))
            .await;
        if !ok {
            return FetchOutcome::Failed;
        }
        self.reload().await
    }

    pub async fn state(&self) -> ViewState<Vec<Discount>> {
        self.cell.state().await
    }
}
