//! Dealer and product discount views
//!
//! Both fetch the active discounts for their target and, when asked, the
//! upcoming ones narrowed to that target. The two calls run one after the
//! other.

use hub_client::http::HttpClient;
use shared::error::AppResult;
use shared::models::Discount;
use shared::types::EntityId;
use tokio::sync::Mutex;

use super::{FetchOutcome, ViewCell, ViewContext, ViewState};
use crate::reconcile::{dedupe_by_id, merge_discounts, upcoming_for_dealer, upcoming_for_product};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerQuery {
    pub dealer_id: EntityId,
    pub include_upcoming: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductQuery {
    pub product_id: EntityId,
    pub dealer_id: Option<EntityId>,
    pub include_upcoming: bool,
}

/// Discounts that apply to one dealer
#[derive(Debug)]
pub struct DealerDiscountsView<H> {
    ctx: ViewContext<H>,
    cell: ViewCell<Vec<Discount>>,
    last: Mutex<Option<DealerQuery>>,
}

impl<H: HttpClient> DealerDiscountsView<H> {
    pub fn new(ctx: ViewContext<H>) -> Self {
        let cell = ViewCell::new("dealer_discounts", ctx.alerts.clone());
        Self {
            ctx,
            cell,
            last: Mutex::new(None),
        }
    }

    async fn load_rows(&self, query: DealerQuery) -> AppResult<Vec<Discount>> {
        let api = &self.ctx.api;
        let active = api.discounts_by_dealer(query.dealer_id).await?;

        let rows = if query.include_upcoming {
            let upcoming = api.upcoming_discounts().await?;
            merge_discounts(active, upcoming_for_dealer(&upcoming, query.dealer_id))
        } else {
            dedupe_by_id(active)
        };

        tracing::info!(
            dealer_id = query.dealer_id,
            include_upcoming = query.include_upcoming,
            count = rows.len(),
            "Dealer discounts loaded"
        );
        Ok(rows)
    }

    pub async fn fetch(&self, query: DealerQuery) -> FetchOutcome {
        *self.last.lock().await = Some(query);
        self.cell.run(self.load_rows(query)).await
    }

    /// Repeat the last fetch
    pub async fn refresh(&self) -> FetchOutcome {
        let last = *self.last.lock().await;
        match last {
            Some(query) => self.fetch(query).await,
            None => FetchOutcome::Skipped,
        }
    }

    /// Soft-delete a discount, then refresh
    pub async fn delete(&self, discount_id: EntityId) -> FetchOutcome {
        let ok = self
            .ctx
            .mutate("Discount deleted", self.ctx.api.delete_discount(discount_id))
            .await;
        if !ok {
            return FetchOutcome::Failed;
        }
        self.refresh().await
    }

    pub async fn state(&self) -> ViewState<Vec<Discount>> {
        self.cell.state().await
    }
}

/// Discounts that apply to one product, optionally for one dealer
#[derive(Debug)]
pub struct ProductDiscountsView<H> {
    ctx: ViewContext<H>,
    cell: ViewCell<Vec<Discount>>,
    last: Mutex<Option<ProductQuery>>,
}

impl<H: HttpClient> ProductDiscountsView<H> {
    pub fn new(ctx: ViewContext<H>) -> Self {
        let cell = ViewCell::new("product_discounts", ctx.alerts.clone());
        Self {
            ctx,
            cell,
            last: Mutex::new(None),
        }
    }

    async fn load_rows(&self, query: ProductQuery) -> AppResult<Vec<Discount>> {
        let api = &self.ctx.api;
        let active = api
            .discounts_by_product(query.product_id, query.dealer_id)
            .await?;

        let rows = if query.include_upcoming {
            let upcoming = api.upcoming_discounts().await?;
            merge_discounts(
                active,
                upcoming_for_product(&upcoming, query.product_id, query.dealer_id),
            )
        } else {
            dedupe_by_id(active)
        };

        tracing::info!(
            product_id = query.product_id,
            dealer_id = ?query.dealer_id,
            include_upcoming = query.include_upcoming,
            count = rows.len(),
            "Product discounts loaded"
        );
        Ok(rows)
    }

    pub async fn fetch(&self, query: ProductQuery) -> FetchOutcome {
        *self.last.lock().await = Some(query);
        self.cell.run(self.load_rows(query)).await
    }

    pub async fn refresh(&self) -> FetchOutcome {
        let last = *self.last.lock().await;
        match last {
            Some(query) => self.fetch(query).await,
            None => FetchOutcome::Skipped,
        }
    }

    pub async fn delete(&self, discount_id: EntityId) -> FetchOutcome {
        let ok = self
            .ctx
            .mutate("Discount deleted", self.ctx.api.delete_discount(discount_id))
            .await;
        if !ok {
            return FetchOutcome::Failed;
        }
        self.refresh().await
    }

    pub async fn state(&self) -> ViewState<Vec<Discount>> {
        self.cell.state().await
    }
}
