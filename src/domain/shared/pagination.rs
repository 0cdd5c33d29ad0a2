use super::errors::DomainError;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const PAGE_SIZE: i64 = 20;
pub const MAX_PAGE: i64 = 999;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub struct PageRequest {
    pub page: i64,
}

impl PageRequest {
    pub fn new(page: i64) -> Result<Self, DomainError> {
        if !(1..=MAX_PAGE).contains(&page) {
            return Err(DomainError::ValidationError("Invalid page number.".into()));
        }
        Ok(Self { page })
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * PAGE_SIZE
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// Builds a page from rows fetched with `limit + 1`; the extra row only signals `has_more`.
    pub fn from_overfetch(mut rows: Vec<T>, request: PageRequest) -> Self {
        let page_size = request.limit();
        let has_more = rows.len() as i64 > page_size;
        rows.truncate(page_size as usize);
        Self {
            items: rows,
            page: request.page,
            page_size,
            has_more,
        }
    }
}
