use serde::Serialize;

/// Pagination parameters, taken from the query string.
#[derive(Debug, Clone, Copy, FromForm)]
pub struct PaginationRequest {
    /// 1-based page number.
    #[field(default = 1)]
    page_num: u32,
    /// Number of items per page.
    #[field(default = 50)]
    page_size: u32,
}

impl PaginationRequest {
    /// How many documents to skip to reach the requested page.
    pub fn skip(&self) -> u32 {
        self.page_num.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Wrap a page of items in the response envelope.
    pub fn to_paginated<T>(self, total: u64, items: Vec<T>) -> Paginated<T> {
        Paginated {
            items,
            pagination: PaginationResult {
                page_num: self.page_num,
                page_size: self.page_size,
                total,
            },
        }
    }
}

/// A single page of results.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationResult,
}

/// Description of the returned page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationResult {
    pub page_num: u32,
    pub page_size: u32,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_counts_whole_pages() {
        let pagination = PaginationRequest {
            page_num: 3,
            page_size: 20,
        };
        assert_eq!(pagination.skip(), 40);
        assert_eq!(pagination.page_size(), 20);
    }

    #[test]
    fn page_zero_is_treated_as_the_first_page() {
        let pagination = PaginationRequest {
            page_num: 0,
            page_size: 20,
        };
        assert_eq!(pagination.skip(), 0);
    }

    #[test]
    fn envelope_reports_the_total() {
        let pagination = PaginationRequest {
            page_num: 1,
            page_size: 2,
        };
        let page = pagination.to_paginated(5, vec!["a", "b"]);
        assert_eq!(page.items, vec!["a", "b"]);
        assert_eq!(
            page.pagination,
            PaginationResult {
                page_num: 1,
                page_size: 2,
                total: 5,
            }
        );
    }
}
