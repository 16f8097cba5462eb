//! Page bookkeeping for server-paginated lists.

use crate::shared::config::DEFAULT_PAGE_SIZE;
use contracts::domain::a002_purchase_order::ServerPagination;

/// Pagination as displayed, derived from the last successful fetch.
///
/// Pages are 1-based. `start_index`/`end_index` are 1-based item positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn empty(items_per_page: usize) -> Self {
        Self::derive(&ServerPagination::default(), items_per_page)
    }

    /// Combine the server's counts with the page size the client asked for.
    ///
    /// The server's page size and page count are ignored: if the user changed
    /// page size while a request was in flight, the local value is the one
    /// being shown. A server page past the last local page is clamped onto it.
    pub fn derive(server: &ServerPagination, items_per_page: usize) -> Self {
        let items_per_page = items_per_page.max(1);
        let total_items = server.total_items;
        let total_pages = total_items.div_ceil(items_per_page);
        let last_page = total_pages.max(1);
        let current_page = server.current_page.clamp(1, last_page);

        let start_index = (current_page - 1) * items_per_page + 1;
        let end_index = (current_page * items_per_page).min(total_items);

        Self {
            current_page,
            total_pages,
            total_items,
            items_per_page,
            start_index,
            end_index,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    /// "Showing 11-20 of 25"
    pub fn summary(&self) -> String {
        if self.is_empty() {
            "No results".to_string()
        } else {
            format!(
                "Showing {}-{} of {}",
                self.start_index, self.end_index, self.total_items
            )
        }
    }
}

/// Page the user is asking for. Changing it is a pure state transition; the
/// owning view decides when to refetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageState {
    pub current_page: usize,
    pub items_per_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// A new page size always starts over at page 1.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(current_page: usize, total_pages: usize, total_items: usize) -> ServerPagination {
        ServerPagination {
            current_page,
            total_pages,
            total_items,
        }
    }

    #[test]
    fn first_of_three_pages() {
        let p = Pagination::derive(&server(1, 3, 25), 10);
        assert_eq!(p.start_index, 1);
        assert_eq!(p.end_index, 10);
        assert!(p.has_next_page);
        assert!(!p.has_previous_page);
        assert_eq!(p.summary(), "Showing 1-10 of 25");
    }

    #[test]
    fn last_partial_page() {
        let p = Pagination::derive(&server(3, 3, 25), 10);
        assert_eq!(p.start_index, 21);
        assert_eq!(p.end_index, 25);
        assert!(!p.has_next_page);
        assert!(p.has_previous_page);
    }

    #[test]
    fn local_page_size_wins_over_server() {
        // Server answered for page 3 of 10-item pages, user switched to 25.
        let p = Pagination::derive(&server(3, 3, 25), 25);
        assert_eq!(p.items_per_page, 25);
        assert_eq!(p.current_page, 1);
        assert_eq!(p.start_index, 1);
        assert_eq!(p.end_index, 25);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next_page);
    }

    #[test]
    fn empty_result() {
        let p = Pagination::derive(&server(1, 0, 0), 10);
        assert!(p.is_empty());
        assert_eq!(p.end_index, 0);
        assert!(!p.has_next_page);
        assert!(!p.has_previous_page);
        assert_eq!(p.summary(), "No results");
    }

    #[test]
    fn index_bounds_hold_for_all_inputs() {
        for total_items in 0usize..60 {
            for per_page in [1, 3, 10, 25] {
                let total_pages = total_items.div_ceil(per_page);
                for current_page in 0..=total_pages + 2 {
                    let p = Pagination::derive(
                        &server(current_page, total_pages, total_items),
                        per_page,
                    );
                    assert!(p.end_index <= total_items);
                    assert_eq!(p.has_next_page, p.current_page < total_pages);
                    if total_items > 0 {
                        assert!(p.start_index <= p.end_index, "{:?}", p);
                    }
                }
            }
        }
    }

    #[test]
    fn changing_page_size_resets_page() {
        for prior in 1..20 {
            let mut state = PageState::new(10);
            state.set_page(prior);
            state.set_items_per_page(50);
            assert_eq!(state.current_page, 1);
            assert_eq!(state.items_per_page, 50);
        }
    }

    #[test]
    fn set_page_is_one_based() {
        let mut state = PageState::default();
        state.set_page(0);
        assert_eq!(state.current_page, 1);
        state.set_page(4);
        assert_eq!(state.current_page, 4);
        assert_eq!(state.items_per_page, DEFAULT_PAGE_SIZE);
    }
}
