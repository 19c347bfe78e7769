//! Product and category endpoints

use shared::models::{Category, Product};
use shared::types::EntityId;

use super::{ApiClient, ListPayload};
use crate::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient> ApiClient<H> {
    /// `GET /products`
    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        let payload: ListPayload<Product> = self.http.get("products", &[]).await?;
        Ok(payload.into_vec())
    }

    /// `GET /products/{id}`
    pub async fn get_product(&self, id: EntityId) -> ClientResult<Product> {
        self.http.get(&format!("products/{}", id), &[]).await
    }

    /// `GET /categories`
    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        let payload: ListPayload<Category> = self.http.get("categories", &[]).await?;
        Ok(payload.into_vec())
    }
}
