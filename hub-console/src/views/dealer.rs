//! Dealer detail view

use hub_client::http::HttpClient;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Dealer;
use shared::types::EntityId;

use super::{FetchOutcome, ViewCell, ViewContext, ViewState};

#[derive(Debug)]
pub struct DealerDetailView<H> {
    ctx: ViewContext<H>,
    cell: ViewCell<Dealer>,
}

impl<H: HttpClient> DealerDetailView<H> {
    pub fn new(ctx: ViewContext<H>) -> Self {
        let cell = ViewCell::new("dealer_detail", ctx.alerts.clone());
        Self { ctx, cell }
    }

    async fn load_dealer(&self, id: EntityId) -> AppResult<Dealer> {
        let dealer = self.ctx.api.get_dealer(id).await?;
        tracing::info!(dealer_id = id, users = dealer.users.len(), "Dealer loaded");
        Ok(dealer)
    }

    pub async fn load(&self, id: EntityId) -> FetchOutcome {
        self.cell.run(self.load_dealer(id)).await
    }

    /// Delete a dealer user and drop it from the loaded dealer
    ///
    /// The dealer is not fetched again.
    pub async fn delete_user(&self, user_id: EntityId) -> FetchOutcome {
        let Some(dealer) = self.cell.loaded().await else {
            self.ctx.alerts.error(&AppError::with_message(
                ErrorCode::DealerNotFound,
                "Load a dealer before removing its users",
            ));
            return FetchOutcome::Skipped;
        };

        let ok = self
            .ctx
            .mutate(
                "Dealer user deleted",
                self.ctx.api.delete_dealer_user(dealer.id, user_id),
            )
            .await;
        if !ok {
            return FetchOutcome::Failed;
        }

        self.cell
            .update_loaded(|d| {
                if d.id == dealer.id {
                    d.remove_user(user_id);
                }
            })
            .await;
        FetchOutcome::Loaded
    }

    pub async fn state(&self) -> ViewState<Dealer> {
        self.cell.state().await
    }
}
