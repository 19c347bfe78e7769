//! Role endpoints

use shared::models::Role;

use super::{ApiClient, ListPayload};
use crate::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient> ApiClient<H> {
    /// `GET /roles` (full list, paged client-side)
    pub async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        let payload: ListPayload<Role> = self.http.get("roles", &[]).await?;
        Ok(payload.into_vec())
    }
}
