//! Discount create/edit controller

use hub_client::http::HttpClient;
use shared::error::AppError;
use shared::models::{Category, Dealer, Discount, Product};
use shared::types::EntityId;
use tokio::sync::RwLock;

use super::ViewContext;
use crate::form::DiscountForm;

/// Pick lists offered by the form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormOptions {
    pub products: Vec<Product>,
    pub dealers: Vec<Dealer>,
    pub categories: Vec<Category>,
}

/// Loads form options and submits create/update requests
///
/// Invalid forms are rejected locally; the backend is only called with a
/// payload that passed validation.
#[derive(Debug)]
pub struct DiscountEditor<H> {
    ctx: ViewContext<H>,
    options: RwLock<FormOptions>,
}

impl<H: HttpClient> DiscountEditor<H> {
    pub fn new(ctx: ViewContext<H>) -> Self {
        Self {
            ctx,
            options: RwLock::new(FormOptions::default()),
        }
    }

    /// Fetch products, dealers and categories concurrently
    ///
    /// A failure leaves every list empty and is only logged.
    pub async fn load_options(&self) -> FormOptions {
        let api = &self.ctx.api;
        let loaded = tokio::try_join!(
            api.list_products(),
            api.list_dealers(),
            api.list_categories()
        );

        let options = match loaded {
            Ok((products, dealers, categories)) => FormOptions {
                products,
                dealers,
                categories,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load discount form options");
                FormOptions::default()
            }
        };
        *self.options.write().await = options.clone();
        options
    }

    pub async fn options(&self) -> FormOptions {
        self.options.read().await.clone()
    }

    /// Prefill a form from an existing discount
    pub async fn load_for_edit(&self, id: EntityId) -> Option<DiscountForm> {
        match self.ctx.api.get_discount(id).await {
            Ok(discount) => Some(DiscountForm::from_discount(&discount)),
            Err(e) => {
                self.ctx.alerts.error(&AppError::from(e));
                None
            }
        }
    }

    pub async fn create(&self, form: &DiscountForm) -> Option<Discount> {
        let payload = match form.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.ctx.alerts.error(&err);
                return None;
            }
        };
        match self.ctx.api.create_discount(&payload).await {
            Ok(created) => {
                self.ctx
                    .alerts
                    .success(format!("Discount \"{}\" created", created.name));
                Some(created)
            }
            Err(e) => {
                self.ctx.alerts.error(&AppError::from(e));
                None
            }
        }
    }

    pub async fn update(&self, id: EntityId, form: &DiscountForm) -> Option<Discount> {
        let payload = match form.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.ctx.alerts.error(&err);
                return None;
            }
        };
        match self.ctx.api.update_discount(id, &payload).await {
            Ok(updated) => {
                self.ctx
                    .alerts
                    .success(format!("Discount \"{}\" updated", updated.name));
                Some(updated)
            }
            Err(e) => {
                self.ctx.alerts.error(&AppError::from(e));
                None
            }
        }
    }
}
