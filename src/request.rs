use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::query::SortKey;

/// Smallest page a caller can request.
pub const MIN_PAGE_SIZE: i32 = 1;

/// Largest page a caller can request. Oversized requests are clamped, not rejected.
pub const MAX_PAGE_SIZE: i32 = 50;

/// Page size used when the transport omits `pageSize`.
pub const DEFAULT_PAGE_SIZE: i32 = 10;

/// A declarative paging/filter/sort request, typically decoded from the
/// query string or body of a list endpoint.
///
/// Out-of-range paging values are never an error: the paginator clamps them
/// through [`PageRequest::effective_page_number`] and
/// [`PageRequest::effective_page_size`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PageRequest {
    pub page_number: i32,
    pub page_size: i32,
    pub search_text: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub order_by: SortKey,
    pub descending: Option<bool>,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search_text: None,
            start_date: None,
            end_date: None,
            order_by: SortKey::default(),
            descending: None,
        }
    }
}

impl PageRequest {
    pub fn new(page_number: i32, page_size: i32) -> Self {
        PageRequest {
            page_number,
            page_size,
            ..Default::default()
        }
    }

    /// Effective page number: always >= 1.
    pub fn effective_page_number(&self) -> i32 {
        self.page_number.max(1)
    }

    /// Effective page size: always within [MIN_PAGE_SIZE, MAX_PAGE_SIZE].
    pub fn effective_page_size(&self) -> i32 {
        self.page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
    }

    /// Search text with surrounding whitespace removed, or None when there is
    /// nothing to search for. A blank search box is treated as "no filter".
    pub fn search_term(&self) -> Option<&str> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
