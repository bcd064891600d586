use serde::{Deserialize, Serialize};

/// Page size used when a caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query parameters for [`RecordStore::list`](crate::RecordStore::list).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring matched against `code` and `name`.
    /// Empty or whitespace-only text matches everything.
    pub text: Option<String>,
    /// 1-based page number; `0` is treated as the first page.
    pub page: u32,
    pub page_size: u32,
}

impl ListQuery {
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            text: None,
            page,
            page_size,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::page(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of `list` results. `data` and `total` are the contract consumed
/// by list screens; the rest is derived bookkeeping for pagers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPage<T> {
    pub data: Vec<T>,
    /// Size of the filtered set before pagination, independent of `page`.
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}
