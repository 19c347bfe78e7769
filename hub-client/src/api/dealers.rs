//! Dealer endpoints

use shared::models::Dealer;
use shared::types::EntityId;

use super::{Ack, ApiClient, ListPayload};
use crate::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient> ApiClient<H> {
    /// `GET /dealers`
    pub async fn list_dealers(&self) -> ClientResult<Vec<Dealer>> {
        let payload: ListPayload<Dealer> = self.http.get("dealers", &[]).await?;
        Ok(payload.into_vec())
    }

    /// `GET /dealers/{id}`
    pub async fn get_dealer(&self, id: EntityId) -> ClientResult<Dealer> {
        self.http.get(&format!("dealers/{}", id), &[]).await
    }

    /// `DELETE /dealers/{dealerId}/users/{userId}`
    pub async fn delete_dealer_user(
        &self,
        dealer_id: EntityId,
        user_id: EntityId,
    ) -> ClientResult<()> {
        let path = format!("dealers/{}/users/{}", dealer_id, user_id);
        let _: Ack = self.http.delete(&path).await?;
        tracing::info!(dealer_id, user_id, "Dealer user deleted");
        Ok(())
    }
}
