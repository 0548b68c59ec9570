//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: u64 = 50;
const MAX_PAGE_SIZE: u64 = 200;

/// Request parameters for paginated queries (`?page=2&page_size=50`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request, clamping out-of-range values.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Re-clamp values that came straight from a query string.
    pub fn normalized(self) -> Self {
        Self::new(self.page, self.page_size)
    }

    /// SQL `OFFSET`.
    pub fn offset(&self) -> i64 {
        (self.page.saturating_sub(1) * self.page_size) as i64
    }

    /// SQL `LIMIT`.
    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages (at least 1).
    pub total_pages: u64,
}

impl<T: Serialize> PageResponse<T> {
    /// Build a page from the fetched items and the total row count.
    pub fn new(items: Vec<T>, request: &PageRequest, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(request.page_size.max(1)).max(1);
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total_items,
            total_pages,
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamping() {
        let req = PageRequest::new(0, 10_000);
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, MAX_PAGE_SIZE);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_offset() {
        let req = PageRequest::new(3, 20);
        assert_eq!(req.offset(), 40);
        assert_eq!(req.limit(), 20);
    }

    #[test]
    fn test_total_pages() {
        let req = PageRequest::new(1, 20);
        let page: PageResponse<u8> = PageResponse::new(vec![], &req, 41);
        assert_eq!(page.total_pages, 3);

        let empty: PageResponse<u8> = PageResponse::new(vec![], &req, 0);
        assert_eq!(empty.total_pages, 1);
    }
}
