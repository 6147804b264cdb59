//! Page navigation arithmetic for the list view.

/// Position within a paginated result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether moving by `delta` pages would land inside `[1, total_pages]`.
    pub fn can_move(&self, delta: i64) -> bool {
        let candidate = i64::from(self.current_page).saturating_add(delta);
        candidate >= 1 && candidate <= i64::from(self.total_pages)
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}

/// 1-based inclusive range of items shown on `current_page`.
///
/// An empty result gives `(1, 0)` on the first page.
pub fn display_range(items_per_page: u32, current_page: u32, total_count: u64) -> (u64, u64) {
    let per_page = u64::from(items_per_page);
    let page = u64::from(current_page.max(1));
    let start = (page - 1).saturating_mul(per_page).saturating_add(1);
    let end = page.saturating_mul(per_page).min(total_count);
    (start, end)
}

/// `Showing S-E of T movies`
pub fn results_label(items_per_page: u32, current_page: u32, total_count: u64) -> String {
    let (start, end) = display_range(items_per_page, current_page, total_count);
    format!("Showing {}-{} of {} movies", start, end, total_count)
}
