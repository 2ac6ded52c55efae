pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// A 1-indexed page request. Both values are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: u32,
}

impl Pagination {
    /// Builds a page request, replacing zero values with the defaults.
    pub fn normalized(page: u32, page_size: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1).saturating_mul(i64::from(self.page_size))
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::normalized(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}
