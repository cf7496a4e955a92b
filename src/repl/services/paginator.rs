//! # Pagination Service
//!
//! Splits a filtered result set into fixed-size pages. Paging never re-runs the
//! filter; it only picks a different slice of the set it was given.

use crate::repl::events::CommandEvent;
use crate::repl::models::CountryRecord;

/// Rows per page of the result table
pub const PAGE_SIZE: usize = 10;

/// Number of pages needed for `len` rows (0 rows -> 0 pages)
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Rows of page `page_number` (1-based), clamped to what is available
pub fn page<T>(results: &[T], page_number: usize, page_size: usize) -> &[T] {
    if page_number == 0 {
        return &[];
    }
    let start = (page_number - 1).saturating_mul(page_size).min(results.len());
    let end = start.saturating_add(page_size).min(results.len());
    &results[start..end]
}

/// Selectable control for one page number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    pub page: usize,
}

impl PageControl {
    /// Event that makes this page active
    pub fn action(&self) -> CommandEvent {
        CommandEvent::PageRequested { page: self.page }
    }

    pub fn label(&self) -> String {
        self.page.to_string()
    }
}

/// Active page of the current result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
}

impl PageState {
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

/// Pages a result set and tracks which page is showing
#[derive(Debug, Clone, Default)]
pub struct ResultPaginator {
    state: PageState,
}

impl ResultPaginator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    /// Start over on a new result set: back to page 1, one control per page
    pub fn paginate(&mut self, results: &[CountryRecord]) -> Vec<PageControl> {
        self.state.current_page = 1;
        tracing::debug!(
            "Paginating {} results into {} pages",
            results.len(),
            self.total_pages(results)
        );
        self.controls(results)
    }

    /// One control per page number, ascending
    pub fn controls(&self, results: &[CountryRecord]) -> Vec<PageControl> {
        (1..=self.total_pages(results))
            .map(|page| PageControl { page })
            .collect()
    }

    pub fn total_pages(&self, results: &[CountryRecord]) -> usize {
        total_pages(results.len(), self.state.page_size)
    }

    /// Make `page_number` active and return its rows.
    ///
    /// Numbers outside `1..=total_pages` are refused and leave the active page alone.
    pub fn select<'a>(
        &mut self,
        results: &'a [CountryRecord],
        page_number: usize,
    ) -> Option<&'a [CountryRecord]> {
        let pages = self.total_pages(results);
        if page_number == 0 || page_number > pages {
            tracing::debug!("Ignoring page {} of {}", page_number, pages);
            return None;
        }
        self.state.current_page = page_number;
        Some(self.current_rows(results))
    }

    /// Rows of the active page
    pub fn current_rows<'a>(&self, results: &'a [CountryRecord]) -> &'a [CountryRecord] {
        page(results, self.state.current_page, self.state.page_size)
    }

    /// Page number `delta` steps away from the active one, kept within range
    pub fn relative_page(&self, results: &[CountryRecord], delta: isize) -> Option<usize> {
        let pages = self.total_pages(results);
        if pages == 0 {
            return None;
        }
        let target = self.state.current_page as isize + delta;
        Some(target.clamp(1, pages as isize) as usize)
    }
}
