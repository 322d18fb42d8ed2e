//! Page windows over an ordered slice.
//!
//! The cursor is zero-based. `total_pages` is never zero: an empty collection
//! still has one (empty) page, and page 0 is then the only valid page.

use crate::error::{FragzError, Result};

pub const DEFAULT_ITEMS_PER_PAGE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    items_per_page: usize,
    current_page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl Paginator {
    /// A zero page size is treated as one item per page.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            items_per_page: items_per_page.max(1),
            current_page: 0,
        }
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.items_per_page).max(1)
    }

    pub fn set_page(&mut self, page: usize, len: usize) -> Result<()> {
        let total = self.total_pages(len);
        if page >= total {
            return Err(FragzError::page_out_of_range(page, total));
        }
        self.current_page = page;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.current_page = 0;
    }

    /// Index range of the current page, clamped to `len`. Empty when the page
    /// starts past the end.
    pub fn window_range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.current_page.saturating_mul(self.items_per_page);
        if start >= len {
            return 0..0;
        }
        let end = start.saturating_add(self.items_per_page).min(len);
        start..end
    }

    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.window_range(items.len())]
    }
}
