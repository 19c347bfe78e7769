//! Product detail view
//!
//! A new load, or unmounting the view, cancels the request in flight.

use hub_client::http::HttpClient;
use shared::error::{AppError, AppResult};
use shared::models::Product;
use shared::types::EntityId;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::{FetchOutcome, ViewCell, ViewContext, ViewState};

#[derive(Debug)]
pub struct ProductDetailView<H> {
    ctx: ViewContext<H>,
    cell: ViewCell<Product>,
    inflight: Mutex<Option<CancellationToken>>,
}

impl<H: HttpClient> ProductDetailView<H> {
    pub fn new(ctx: ViewContext<H>) -> Self {
        let cell = ViewCell::new("product_detail", ctx.alerts.clone());
        Self {
            ctx,
            cell,
            inflight: Mutex::new(None),
        }
    }

    async fn load_product(&self, id: EntityId, token: CancellationToken) -> AppResult<Product> {
        tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!(product_id = id, "Product request cancelled");
                Err(AppError::cancelled())
            }
            result = self.ctx.api.get_product(id) => {
                let product = result?;
                tracing::info!(product_id = id, variants = product.variants.len(), "Product loaded");
                Ok(product)
            }
        }
    }

    pub async fn load(&self, id: EntityId) -> FetchOutcome {
        let token = CancellationToken::new();
        if let Some(previous) = self.inflight.lock().await.replace(token.clone()) {
            previous.cancel();
        }
        self.cell.run(self.load_product(id, token)).await
    }

    /// Cancel any request in flight and clear the view
    pub async fn unmount(&self) {
        if let Some(token) = self.inflight.lock().await.take() {
            token.cancel();
        }
        self.cell.reset().await;
    }

    pub async fn state(&self) -> ViewState<Product> {
        self.cell.state().await
    }
}
