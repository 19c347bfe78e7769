//! Pagination envelope
//!
//! The backend pages lists Spring-style (`content`, `totalElements`, ...,
//! zero-based `number`). Responses are sometimes partial, so they are read
//! as [`RawPage`] and normalized against the request that produced them.

use serde::{Deserialize, Serialize};

/// Default page size used when neither the request nor the server gives one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Page request parameters (zero-based page number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: if size == 0 { DEFAULT_PAGE_SIZE } else { size },
        }
    }

    pub fn first(size: u32) -> Self {
        Self::new(0, size)
    }

    /// Same size, different page
    pub fn with_page(self, page: u32) -> Self {
        Self { page, ..self }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Normalized page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    /// Zero-based page number
    pub number: u32,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    /// Coalesce a possibly partial server page
    ///
    /// Missing `size`/`number` come from the request; missing totals are
    /// derived from what is known.
    pub fn normalize(raw: RawPage<T>, request: PageRequest) -> Self {
        let content = raw.content.unwrap_or_default();
        let size = raw.size.filter(|s| *s > 0).unwrap_or(request.size);
        let number = raw.number.unwrap_or(request.page);
        let total_elements = raw
            .total_elements
            .unwrap_or_else(|| u64::from(number) * u64::from(size) + content.len() as u64);
        let total_pages = raw
            .total_pages
            .unwrap_or_else(|| page_count(total_elements, size));
        let first = raw.first.unwrap_or(number == 0);
        let last = raw
            .last
            .unwrap_or(number.saturating_add(1) >= total_pages);
        let empty = raw.empty.unwrap_or(content.is_empty());

        Self {
            content,
            total_elements,
            total_pages,
            size,
            number,
            first,
            last,
            empty,
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Server page as received; every field may be missing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage<T> {
    pub content: Option<Vec<T>>,
    pub total_elements: Option<u64>,
    pub total_pages: Option<u32>,
    pub size: Option<u32>,
    pub number: Option<u32>,
    pub first: Option<bool>,
    pub last: Option<bool>,
    pub empty: Option<bool>,
}

/// `ceil(total / size)`, never less than one page
fn page_count(total: u64, size: u32) -> u32 {
    if size == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(size));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

/// Page an in-memory list client-side
///
/// Used where the backend returns the full list (roles).
pub fn to_page<T: Clone>(rows: &[T], page: u32, size: u32) -> Page<T> {
    let size = if size == 0 { DEFAULT_PAGE_SIZE } else { size };
    let total_elements = rows.len() as u64;
    let total_pages = page_count(total_elements, size);

    let start = (page as usize).saturating_mul(size as usize);
    let content: Vec<T> = rows.iter().skip(start).take(size as usize).cloned().collect();

    Page {
        empty: content.is_empty(),
        content,
        total_elements,
        total_pages,
        size,
        number: page,
        first: page == 0,
        last: page.saturating_add(1) >= total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_page_middle_page() {
        let rows: Vec<u32> = (1..=25).collect();
        let page = to_page(&rows, 1, 10);
        assert_eq!(page.content, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.number, 1);
        assert!(!page.first);
        assert!(!page.last);
        assert!(!page.empty);
    }

    #[test]
    fn test_to_page_last_partial_page() {
        let rows: Vec<u32> = (1..=25).collect();
        let page = to_page(&rows, 2, 10);
        assert_eq!(page.content, vec![21, 22, 23, 24, 25]);
        assert!(page.last);
        assert!(!page.first);
    }

    #[test]
    fn test_to_page_empty_input_has_one_page() {
        let rows: Vec<u32> = Vec::new();
        let page = to_page(&rows, 0, 10);
        assert_eq!(page.total_pages, 1);
        assert!(page.first);
        assert!(page.last);
        assert!(page.empty);
    }

    #[test]
    fn test_to_page_past_the_end() {
        let rows: Vec<u32> = (1..=5).collect();
        let page = to_page(&rows, 4, 10);
        assert!(page.content.is_empty());
        assert!(page.last);
    }

    #[test]
    fn test_normalize_full_server_page() {
        let raw: RawPage<i64> = serde_json::from_value(json!({
            "content": [1, 2],
            "totalElements": 12,
            "totalPages": 6,
            "size": 2,
            "number": 3,
            "first": false,
            "last": false,
            "empty": false
        }))
        .unwrap();
        let page = Page::normalize(raw, PageRequest::new(0, 50));
        assert_eq!(page.size, 2);
        assert_eq!(page.number, 3);
        assert_eq!(page.total_pages, 6);
    }

    #[test]
    fn test_normalize_partial_page_uses_request() {
        let raw: RawPage<i64> = serde_json::from_value(json!({ "content": [1, 2, 3] })).unwrap();
        let page = Page::normalize(raw, PageRequest::new(2, 10));
        assert_eq!(page.number, 2);
        assert_eq!(page.size, 10);
        assert_eq!(page.total_elements, 23);
        assert_eq!(page.total_pages, 3);
        assert!(!page.first);
        assert!(page.last);
        assert!(!page.empty);
    }

    #[test]
    fn test_normalize_missing_content() {
        let raw: RawPage<i64> = serde_json::from_value(json!({ "totalElements": 0 })).unwrap();
        let page = Page::normalize(raw, PageRequest::default());
        assert!(page.content.is_empty());
        assert!(page.empty);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = to_page(&[1, 2, 3], 0, 2);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalElements"], 3);
        assert_eq!(json["totalPages"], 2);
    }
}
