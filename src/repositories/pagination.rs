//! Page-based offset/limit scope shared by the listing operations.

use sea_orm::QuerySelect;

/// A one-based page window over an ordered query.
///
/// No clamping is performed: a `page_size` of 0 produces `LIMIT 0` and
/// therefore an empty page. Callers validate page numbers before building a
/// scope; page 0 is treated like page 1 instead of underflowing the offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageScope {
    pub page_num: u64,
    pub page_size: u64,
}

impl PageScope {
    pub fn new(page_num: u64, page_size: u64) -> Self {
        Self { page_num, page_size }
    }

    pub fn offset(&self) -> u64 {
        self.page_num.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }

    /// Restrict `query` to this page.
    pub fn apply<Q>(&self, query: Q) -> Q
    where
        Q: QuerySelect,
    {
        query.offset(self.offset()).limit(self.limit())
    }
}
