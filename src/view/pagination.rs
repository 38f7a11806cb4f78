//! Paging over the filtered expenses
//!
//! [`paginate`] does not clamp the page number: a page before the first or
//! past the last yields an empty slice. Callers keep the page in range with
//! [`clamp_page`] or a [`PageCursor`], which also reports whether a
//! previous or next page exists

/// The page size used when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Number of pages needed to show `item_count` items, zero when there are none
///
/// A page size of zero is treated as one item per page
pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    item_count.div_ceil(page_size.max(1))
}

/// The slice shown on the 1-based `page_number`
///
/// Returns the items at offsets `(page_number - 1) * page_size` up to
/// `page_number * page_size - 1`, truncated at the end of `items`. Page 0 and
/// pages past the end are empty.
pub fn paginate<T>(items: &[T], page_number: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let Some(index) = page_number.checked_sub(1) else {
        return &[];
    };
    let Some(start) = index.checked_mul(page_size) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());

    &items[start..end]
}

/// Pin `page_number` into `[1, total_pages]`; page 1 when there are no pages
pub fn clamp_page(page_number: usize, total_pages: usize) -> usize {
    page_number.clamp(1, total_pages.max(1))
}

/// Current position in a paged list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: usize,
    total_pages: usize,
}

impl PageCursor {
    /// Start at `page`, clamped into range
    pub fn new(page: usize, total_pages: usize) -> Self {
        Self {
            page: clamp_page(page, total_pages),
            total_pages,
        }
    }

    /// The current 1-based page
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages in the list
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Whether a previous page exists
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
