//! Discount endpoints

use shared::models::{
    Discount, DiscountCalculation, DiscountCalculationRequest, DiscountPayload, DiscountSearch,
};
use shared::types::EntityId;
use shared::{Page, PageRequest};

use super::{Ack, ApiClient, ListPayload, into_page, page_query};
use crate::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient> ApiClient<H> {
    /// `GET /discounts?page&size`
    pub async fn list_discounts(&self, request: PageRequest) -> ClientResult<Page<Discount>> {
        let payload: ListPayload<Discount> =
            self.http.get("discounts", &page_query(request)).await?;
        Ok(into_page(payload, request))
    }

    /// `GET /discounts/search?q&page&size&sortBy&sortDirection`
    pub async fn search_discounts(
        &self,
        search: &DiscountSearch,
        request: PageRequest,
    ) -> ClientResult<Page<Discount>> {
        let mut query = vec![("q", search.query.clone())];
        query.extend(page_query(request));
        query.push(("sortBy", search.sort_by.clone()));
        query.push(("sortDirection", search.sort_direction.as_str().to_string()));

        let payload: ListPayload<Discount> = self.http.get("discounts/search", &query).await?;
        Ok(into_page(payload, request))
    }

    /// `GET /discounts/upcoming`
    pub async fn upcoming_discounts(&self) -> ClientResult<Vec<Discount>> {
        let payload: ListPayload<Discount> = self.http.get("discounts/upcoming", &[]).await?;
        Ok(payload.into_vec())
    }

    /// `GET /discounts/expired`
    pub async fn expired_discounts(&self) -> ClientResult<Vec<Discount>> {
        let payload: ListPayload<Discount> = self.http.get("discounts/expired", &[]).await?;
        Ok(payload.into_vec())
    }

    /// Active discounts for a dealer, `GET /discounts/dealer/{dealerId}`
    pub async fn discounts_by_dealer(&self, dealer_id: EntityId) -> ClientResult<Vec<Discount>> {
        let path = format!("discounts/dealer/{}", dealer_id);
        let payload: ListPayload<Discount> = self.http.get(&path, &[]).await?;
        Ok(payload.into_vec())
    }

    /// Active discounts for a product, optionally narrowed to one dealer,
    /// `GET /discounts/product/{productId}?dealerId`
    pub async fn discounts_by_product(
        &self,
        product_id: EntityId,
        dealer_id: Option<EntityId>,
    ) -> ClientResult<Vec<Discount>> {
        let path = format!("discounts/product/{}", product_id);
        let query: Vec<(&str, String)> = dealer_id
            .map(|id| vec![("dealerId", id.to_string())])
            .unwrap_or_default();
        let payload: ListPayload<Discount> = self.http.get(&path, &query).await?;
        Ok(payload.into_vec())
    }

    /// `GET /discounts/{id}`
    pub async fn get_discount(&self, id: EntityId) -> ClientResult<Discount> {
        self.http.get(&format!("discounts/{}", id), &[]).await
    }

    /// `POST /discounts`
    pub async fn create_discount(&self, payload: &DiscountPayload) -> ClientResult<Discount> {
        let created: Discount = self.http.post("discounts", payload).await?;
        tracing::info!(discount_id = created.id, name = %created.name, "Discount created");
        Ok(created)
    }

    /// `PUT /discounts/{id}` (full replace)
    pub async fn update_discount(
        &self,
        id: EntityId,
        payload: &DiscountPayload,
    ) -> ClientResult<Discount> {
        let updated: Discount = self.http.put(&format!("discounts/{}", id), payload).await?;
        tracing::info!(discount_id = id, "Discount updated");
        Ok(updated)
    }

    /// Soft delete, `DELETE /discounts/{id}`
    pub async fn delete_discount(&self, id: EntityId) -> ClientResult<()> {
        let _: Ack = self.http.delete(&format!("discounts/{}", id)).await?;
        tracing::info!(discount_id = id, "Discount deleted");
        Ok(())
    }

    /// `POST /discounts/{id}/restore`
    pub async fn restore_discount(&self, id: EntityId) -> ClientResult<()> {
        let _: Ack = self
            .http
            .post_empty(&format!("discounts/{}/restore", id))
            .await?;
        tracing::info!(discount_id = id, "Discount restored");
        Ok(())
    }

    /// `POST /discounts/calculate`
    pub async fn calculate_discount(
        &self,
        request: &DiscountCalculationRequest,
    ) -> ClientResult<DiscountCalculation> {
        self.http.post("discounts/calculate", request).await
    }
}
