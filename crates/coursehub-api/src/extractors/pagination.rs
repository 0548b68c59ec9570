//! Query parameter extractors for list endpoints.

use serde::{Deserialize, Serialize};

use coursehub_core::types::pagination::PageRequest;

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (default: 50).
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    PageRequest::default().page_size
}

impl PaginationParams {
    /// Converts to a clamped `PageRequest`.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// `?year=2024` selector used by year-scoped listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YearQuery {
    /// Academic year.
    pub year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_page_request_clamps() {
        let params = PaginationParams {
            page: 0,
            page_size: 0,
        };
        let req = params.into_page_request();
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, 1);
    }
}
