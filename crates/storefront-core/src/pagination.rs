//! Client-side "view more" pagination.

use std::ops::Range;

/// Products shown per page on the home page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    visible: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// Starts with one page visible. A zero page size is treated as one.
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            visible: page_size,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Reveal one more page.
    pub fn show_more(&mut self) {
        self.visible = self.visible.saturating_add(self.page_size);
    }

    pub fn reset(&mut self) {
        self.visible = self.page_size;
    }

    /// Indices to render out of `total` items.
    pub fn visible_range(&self, total: usize) -> Range<usize> {
        0..self.visible.min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible < total
    }
}
