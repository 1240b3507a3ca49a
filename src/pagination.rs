//! Page arithmetic for list endpoints.
//!
//! Not mounted on any route yet; list handlers return every row.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw `?page=&page_size=` query. Values that do not parse, or fall outside
/// their bounds, are replaced by the defaults rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// `page` below 1 becomes 1; `page_size` outside 1..=100 becomes 10.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = page
            .filter(|p| *p >= 1)
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(DEFAULT_PAGE);
        let page_size = page_size
            .filter(|s| (1..=i64::from(MAX_PAGE_SIZE)).contains(s))
            .and_then(|s| u32::try_from(s).ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page, page_size }
    }

    pub fn from_query(query: &PageQuery) -> Self {
        let parse = |v: &Option<String>| v.as_deref().and_then(|s| s.trim().parse::<i64>().ok());
        Self::new(parse(&query.page), parse(&query.page_size))
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.page_size))
    }
}

/// One page of results with navigation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub offset: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, pagination: Pagination, total: u64) -> Self {
        let total_pages = pagination.total_pages(total);
        Self {
            data,
            page: pagination.page,
            page_size: pagination.page_size,
            offset: pagination.offset(),
            total,
            total_pages,
            has_next: u64::from(pagination.page) < total_pages,
            has_prev: pagination.page > 1,
        }
    }
}
