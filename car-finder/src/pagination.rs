use std::ops::Range;

/// Number of cars shown per page.
pub const PAGE_SIZE: usize = 10;

/// A 1-based page cursor over a list of fixed size pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Pagination {
    /// # Panics
    ///
    /// Panics if `page_size` is zero.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self { page: 1, page_size }
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Moves the cursor. The page is not checked against the item count.
    pub fn select(&mut self, page: usize) {
        self.page = page;
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    #[must_use]
    pub fn total_pages(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.page_size)
    }

    /// Indices of the current page, clamped to `item_count`. Out of range
    /// pages give an empty range.
    #[must_use]
    pub fn range(&self, item_count: usize) -> Range<usize> {
        let Some(first_page) = self.page.checked_sub(1) else {
            return 0..0;
        };
        let start = first_page.saturating_mul(self.page_size).min(item_count);
        let end = start.saturating_add(self.page_size).min(item_count);
        start..end
    }

    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }
}
