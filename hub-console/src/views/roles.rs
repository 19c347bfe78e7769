//! Role list, paged client-side

use hub_client::http::HttpClient;
use shared::error::AppResult;
use shared::models::Role;
use shared::{Page, to_page};
use tokio::sync::RwLock;

use super::{FetchOutcome, ViewCell, ViewContext, ViewState};

#[derive(Debug)]
pub struct RoleListView<H> {
    ctx: ViewContext<H>,
    cell: ViewCell<Page<Role>>,
    rows: RwLock<Vec<Role>>,
    page_size: u32,
}

impl<H: HttpClient> RoleListView<H> {
    pub fn new(ctx: ViewContext<H>, page_size: u32) -> Self {
        let cell = ViewCell::new("role_list", ctx.alerts.clone());
        Self {
            ctx,
            cell,
            rows: RwLock::new(Vec::new()),
            page_size,
        }
    }

    async fn load_first_page(&self) -> AppResult<Page<Role>> {
        let roles = self.ctx.api.list_roles().await?;
        tracing::info!(count = roles.len(), "Roles loaded");
        let page = to_page(&roles, 0, self.page_size);
        *self.rows.write().await = roles;
        Ok(page)
    }

    /// Fetch every role and show the first page
    pub async fn load(&self) -> FetchOutcome {
        self.cell.run(self.load_first_page()).await
    }

    /// Page through the fetched roles without another request
    pub async fn show_page(&self, page: u32) -> FetchOutcome {
        let rows = self.rows.read().await.clone();
        let size = self.page_size;
        self.cell.run(async move { Ok(to_page(&rows, page, size)) }).await
    }

    pub async fn state(&self) -> ViewState<Page<Role>> {
        self.cell.state().await
    }
}
