//! Page-window arithmetic and the page envelope returned by listings.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page index must be at least 1")]
    ZeroPageIndex,

    #[error("page size must be at least 1")]
    ZeroPageSize,

    #[error("page {page_index} of size {page_size} is out of range")]
    Overflow { page_index: usize, page_size: usize },
}

/// Largest skip any backend can express; SQL offsets are signed 64-bit.
pub const MAX_SKIP: usize = i64::MAX as usize;

/// The skip/limit range selecting one page of a sorted result sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    page_index: usize,
    page_size: usize,
    skip: usize,
}

impl PageWindow {
    /// Builds the window for a 1-based page index.
    pub fn new(page_index: usize, page_size: usize) -> Result<Self, PaginationError> {
        if page_index == 0 {
            return Err(PaginationError::ZeroPageIndex);
        }
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        let skip = page_size
            .checked_mul(page_index - 1)
            .filter(|skip| *skip <= MAX_SKIP && page_size <= MAX_SKIP)
            .ok_or(PaginationError::Overflow {
                page_index,
                page_size,
            })?;

        Ok(Self {
            page_index,
            page_size,
            skip,
        })
    }

    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of leading items to pass over.
    pub const fn skip(&self) -> usize {
        self.skip
    }

    /// Maximum number of items on the page.
    pub const fn limit(&self) -> usize {
        self.page_size
    }
}

/// One page of results plus the size of the whole filtered sequence.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_index: usize,
    pub page_size: usize,
    /// Items matching the filter across all pages.
    pub total_count: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, window: PageWindow, total_count: usize) -> Self {
        Self {
            items,
            page_index: window.page_index(),
            page_size: window.page_size(),
            total_count,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_count.div_ceil(self.page_size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_skips_nothing() {
        let window = PageWindow::new(1, 25).unwrap();
        assert_eq!(window.skip(), 0);
        assert_eq!(window.limit(), 25);
    }

    #[test]
    fn later_pages_skip_whole_pages() {
        let window = PageWindow::new(4, 10).unwrap();
        assert_eq!(window.skip(), 30);
        assert_eq!(window.limit(), 10);
    }

    #[test]
    fn zero_values_are_rejected() {
        assert_eq!(PageWindow::new(0, 10), Err(PaginationError::ZeroPageIndex));
        assert_eq!(PageWindow::new(1, 0), Err(PaginationError::ZeroPageSize));
    }

    #[test]
    fn overflowing_window_is_rejected() {
        assert_eq!(
            PageWindow::new(usize::MAX, 2),
            Err(PaginationError::Overflow {
                page_index: usize::MAX,
                page_size: 2,
            })
        );
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Page<u8> = Page::new(vec![], PageWindow::new(1, 10).unwrap(), 21);
        assert_eq!(page.total_pages(), 3);
        let empty: Page<u8> = Page::new(vec![], PageWindow::new(1, 10).unwrap(), 0);
        assert_eq!(empty.total_pages(), 0);
    }

    #[test]
    fn windows_past_the_signed_offset_range_are_rejected() {
        assert!(PageWindow::new(1 << 62, 4).is_err());
        assert!(PageWindow::new(1, usize::MAX).is_err());

        let last = PageWindow::new(MAX_SKIP / 2 + 1, 2).unwrap();
        assert_eq!(last.skip(), MAX_SKIP - 1);
    }
}
