//! Typed endpoint adapters
//!
//! One method per backend endpoint. Adapters build the path and query,
//! hand the call to an [`HttpClient`] and return typed payloads; the
//! envelope has already been removed by the client.

mod catalog;
mod dealers;
mod discounts;
mod roles;

use serde::Deserialize;
use serde::de::IgnoredAny;
use shared::{Page, PageRequest, RawPage};

use crate::http::HttpClient;

/// Backend API bound to an HTTP client implementation
#[derive(Debug, Clone)]
pub struct ApiClient<H> {
    http: H,
}

impl<H: HttpClient> ApiClient<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }
}

/// List endpoints answer with either a bare array or a page object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListPayload<T> {
    List(Vec<T>),
    Page(RawPage<T>),
}

impl<T> ListPayload<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::List(rows) => rows,
            ListPayload::Page(page) => page.content.unwrap_or_default(),
        }
    }
}

/// Page endpoints may also answer with a bare array
pub(crate) fn into_page<T>(payload: ListPayload<T>, request: PageRequest) -> Page<T> {
    match payload {
        ListPayload::Page(raw) => Page::normalize(raw, request),
        ListPayload::List(rows) => Page::normalize(
            RawPage {
                content: Some(rows),
                total_elements: None,
                total_pages: None,
                size: None,
                number: None,
                first: None,
                last: None,
                empty: None,
            },
            request,
        ),
    }
}

/// Query parameters of a page request
pub(crate) fn page_query(request: PageRequest) -> Vec<(&'static str, String)> {
    vec![
        ("page", request.page.to_string()),
        ("size", request.size.to_string()),
    ]
}

/// Mutation acknowledgements carry nothing the console needs
pub(crate) type Ack = IgnoredAny;
