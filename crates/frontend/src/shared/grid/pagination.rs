//! Page strip computation. Pages are 1-based.

/// Pages shown on each side of the current page.
pub const PAGE_WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Pagination owned by the caller; the grid only reads it and emits changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: usize,
    pub total_pages: usize,
    pub per_page: usize,
}

impl PaginationState {
    pub fn new(current_page: usize, total_pages: usize, per_page: usize) -> Self {
        Self {
            current_page,
            total_pages,
            per_page,
        }
    }

    /// Derives the page count from a row total.
    pub fn from_total(current_page: usize, total_rows: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        Self::new(current_page, total_rows.div_ceil(per_page).max(1), per_page)
    }

    pub fn page(&self) -> usize {
        clamp_page(self.current_page, self.total_pages)
    }

    pub fn has_previous(&self) -> bool {
        self.page() > 1
    }

    pub fn has_next(&self) -> bool {
        self.page() < self.total_pages.max(1)
    }

    /// Target of the "Previous" control, `None` at the first page.
    pub fn previous(&self) -> Option<usize> {
        self.has_previous().then(|| self.page() - 1)
    }

    /// Target of the "Next" control, `None` at the last page.
    pub fn next(&self) -> Option<usize> {
        self.has_next().then(|| self.page() + 1)
    }

    /// 1-based index range of rows on the current page, for "Showing x–y of z".
    pub fn row_range(&self, total_rows: usize) -> Option<(usize, usize)> {
        if total_rows == 0 {
            return None;
        }
        let start = (self.page() - 1) * self.per_page + 1;
        if start > total_rows {
            return None;
        }
        Some((start, (start + self.per_page - 1).min(total_rows)))
    }

    pub fn items(&self) -> Vec<PageItem> {
        page_items(self.current_page, self.total_pages)
    }

    /// Page to report for a click on `target`; `None` when the requested
    /// page would not change. Compares against the requested page, not the
    /// clamped one, so a click can pull a stale page back into range.
    pub fn page_request(&self, target: usize) -> Option<usize> {
        let target = clamp_page(target, self.total_pages);
        (target != self.current_page).then_some(target)
    }
}

pub fn clamp_page(current: usize, total: usize) -> usize {
    current.clamp(1, total.max(1))
}

/// First and last page always; `PAGE_WINDOW` pages around the current one;
/// any gap in between collapses into a single ellipsis.
pub fn page_items(current: usize, total: usize) -> Vec<PageItem> {
    let total = total.max(1);
    let current = clamp_page(current, total);

    let mut items = vec![PageItem::Page(1)];
    if total == 1 {
        return items;
    }

    let start = current.saturating_sub(PAGE_WINDOW).max(2);
    let end = (current + PAGE_WINDOW).min(total - 1);

    if start > 2 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total));
    items
}
