//! Paged discount list with debounced search

use std::sync::Arc;
use std::time::Duration;

use hub_client::http::HttpClient;
use parking_lot::Mutex;
use shared::error::AppResult;
use shared::models::{Discount, DiscountSearch};
use shared::types::EntityId;
use shared::{Page, PageRequest};

use super::{DiscountEditor, FetchOutcome, ViewCell, ViewContext, ViewState};
use crate::debounce::{Debouncer, SearchTrigger};
use crate::form::DiscountForm;

/// What the list currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub request: PageRequest,
    /// `None` lists every discount
    pub search: Option<String>,
}

#[derive(Debug)]
pub struct DiscountListView<H> {
    ctx: ViewContext<H>,
    cell: ViewCell<Page<Discount>>,
    /// Query behind the state last stored by the cell
    query: Mutex<ListQuery>,
    hint: Mutex<Option<String>>,
    debouncer: Debouncer,
    editor: DiscountEditor<H>,
}

impl<H: HttpClient + Clone> DiscountListView<H> {
    pub fn new(ctx: ViewContext<H>, page_size: u32, debounce: Duration) -> Self {
        let cell = ViewCell::new("discount_list", ctx.alerts.clone());
        Self {
            editor: DiscountEditor::new(ctx.clone()),
            ctx,
            cell,
            query: Mutex::new(ListQuery {
                request: PageRequest::first(page_size),
                search: None,
            }),
            hint: Mutex::new(None),
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Start on `page` instead of the first one; nothing is fetched
    pub fn at_page(mut self, page: u32) -> Self {
        let query = self.query.get_mut();
        query.request = query.request.with_page(page);
        self
    }
}

impl<H: HttpClient> DiscountListView<H> {
    async fn load_page(&self, query: &ListQuery) -> AppResult<Page<Discount>> {
        let api = &self.ctx.api;
        let page = match &query.search {
            Some(text) => {
                api.search_discounts(&DiscountSearch::new(text.as_str()), query.request)
                    .await?
            }
            None => api.list_discounts(query.request).await?,
        };
        tracing::info!(
            page = page.number,
            count = page.len(),
            total = page.total_elements,
            search = ?query.search,
            "Discount page loaded"
        );
        Ok(page)
    }

    async fn fetch(&self, query: ListQuery) -> FetchOutcome {
        let committed = query.clone();
        self.cell
            .run_then(self.load_page(&query), || *self.query.lock() = committed)
            .await
    }

    /// Go to `page`, keeping the current search
    pub async fn show_page(&self, page: u32) -> FetchOutcome {
        let mut query = self.query.lock().clone();
        query.request = query.request.with_page(page);
        self.fetch(query).await
    }

    /// Repeat the current query (same page, same search)
    pub async fn reload(&self) -> FetchOutcome {
        let query = self.query.lock().clone();
        self.fetch(query).await
    }

    /// Apply search box content immediately
    pub async fn search_now(&self, input: &str) -> FetchOutcome {
        self.debouncer.cancel();
        match SearchTrigger::classify(input) {
            SearchTrigger::Hint(hint) => {
                *self.hint.lock() = Some(hint);
                FetchOutcome::Skipped
            }
            SearchTrigger::Reset => self.run_search(None).await,
            SearchTrigger::Query(text) => self.run_search(Some(text)).await,
        }
    }

    async fn run_search(&self, search: Option<String>) -> FetchOutcome {
        *self.hint.lock() = None;
        let request = self.query.lock().request.with_page(0);
        self.fetch(ListQuery { request, search }).await
    }

    /// Hint shown instead of results for too-short input
    pub async fn hint(&self) -> Option<String> {
        self.hint.lock().clone()
    }

    pub fn current_query(&self) -> ListQuery {
        self.query.lock().clone()
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

    pub fn editor(&self) -> &DiscountEditor<H> {
        &self.editor
    }

    /// Create through the editor; reload the list when it succeeds
    pub async fn create(&self, form: &DiscountForm) -> Option<Discount> {
        let created = self.editor.create(form).await?;
        self.reload().await;
        Some(created)
    }

    pub async fn update(&self, id: EntityId, form: &DiscountForm) -> Option<Discount> {
        let updated = self.editor.update(id, form).await?;
        self.reload().await;
        Some(updated)
    }

    pub async fn state(&self) -> ViewState<Page<Discount>> {
        self.cell.state().await
    }

    /// Wait for a scheduled search to finish
    pub async fn settle(&self) {
        self.debouncer.settle().await;
    }
}

impl<H: HttpClient + 'static> DiscountListView<H> {
    /// Feed search box content; searches once the input has been quiet
    /// for the debounce period
    pub async fn on_search_input(self: &Arc<Self>, input: &str) -> SearchTrigger {
        let trigger = SearchTrigger::classify(input);
        match &trigger {
            SearchTrigger::Hint(hint) => {
                self.debouncer.cancel();
                *self.hint.lock() = Some(hint.clone());
            }
            SearchTrigger::Reset => {
                let view = Arc::clone(self);
                self.debouncer.schedule(async move {
                    view.run_search(None).await;
                });
            }
            SearchTrigger::Query(text) => {
                let view = Arc::clone(self);
                let text = text.clone();
                self.debouncer.schedule(async move {
                    view.run_search(Some(text)).await;
                });
            }
        }
        trigger
    }
}
