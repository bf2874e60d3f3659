//! Pagination over the fetched record set
//!
//! The manager owns only counters: the total number of fetched records and
//! the length of the currently displayed prefix. It never fetches; when the
//! displayed prefix exhausts the local set while the server still holds more,
//! it reports "more available" and leaves the refetch decision to the
//! controller.

use crate::model::Record;

/// The pagination state machine's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// No records fetched.
    Empty,
    /// More records are available, locally or on the server.
    Partial,
    /// Every fetched record is displayed and the server holds no more.
    /// Terminal until the next reset.
    Complete,
}

/// The outcome of a "view all" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// All fetched records are now displayed and the server holds no more.
    Revealed,
    /// All fetched records are displayed, but the server reported more beyond
    /// the fetch cap; the caller decides between an uncapped refetch and an
    /// external "view all" navigation.
    ServerHasMore,
}

/// Manages the displayed prefix of the fetched record set.
///
/// The displayed length is a monotonically non-decreasing prefix length in
/// `[0, total]` between resets. `advance` and `reveal_all` are idempotent
/// no-ops once the state is [`PageState::Complete`].
#[derive(Debug, Clone)]
pub struct PaginationManager {
    total: usize,
    displayed: usize,
    server_has_more: bool,
    page_size: usize,
}

impl PaginationManager {
    /// Creates an empty manager with the given page increment.
    pub fn new(page_size: usize) -> Self {
        Self {
            total: 0,
            displayed: 0,
            server_has_more: false,
            page_size: page_size.max(1),
        }
    }

    /// Resets to a freshly fetched record set of `total` records.
    ///
    /// The displayed prefix restarts at zero; callers advance once to show
    /// the first page.
    pub fn reset(&mut self, total: usize, server_has_more: bool) {
        self.total = total;
        self.displayed = 0;
        self.server_has_more = server_has_more;
    }

    /// Replaces the page increment. Takes effect on the next `advance`.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    /// Extends the displayed prefix by one page, clamped to the fetched
    /// total. No-op when already complete.
    pub fn advance(&mut self) {
        if self.state() == PageState::Complete {
            return;
        }
        self.displayed = (self.displayed + self.page_size).min(self.total);
    }

    /// Reveals every fetched record.
    ///
    /// Does not clear the server-more flag: when the server holds records
    /// beyond the fetch cap, the returned outcome signals that the caller
    /// must either refetch uncapped or navigate externally.
    pub fn reveal_all(&mut self) -> RevealOutcome {
        self.displayed = self.total;
        if self.server_has_more {
            RevealOutcome::ServerHasMore
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> PageState {
        if self.total == 0 {
            PageState::Empty
        } else if self.displayed < self.total || self.server_has_more {
            PageState::Partial
        } else {
            PageState::Complete
        }
    }

    /// Returns the number of records currently displayed.
    pub fn visible_len(&self) -> usize {
        self.displayed
    }

    /// Returns the number of fetched records.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns `true` if more records are available, locally or on the
    /// server.
    pub fn has_more(&self) -> bool {
        self.displayed < self.total || self.server_has_more
    }

    /// Returns whether the server reported records beyond the fetched set.
    pub fn server_has_more(&self) -> bool {
        self.server_has_more
    }

    /// Returns the displayed prefix of `records`.
    pub fn visible_slice<'a>(&self, records: &'a [Record]) -> &'a [Record] {
        &records[..self.displayed.min(records.len())]
    }
}

impl Default for PaginationManager {
    fn default() -> Self {
        Self::new(crate::config::defaults::PAGE_SIZE)
    }
}
