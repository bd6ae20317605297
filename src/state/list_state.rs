//! Pagination state machine (pure core).
//!
//! `ListState` owns the accumulated members, the page cursor and the two flags that gate
//! fetching. It performs no I/O: the controller asks it for permission to fetch
//! ([`ListState::begin_fetch`]) and hands it the outcome ([`ListState::complete`]).
//!
//! # Exhaustion contract
//!
//! Only an explicitly empty page marks the list exhausted. A page shorter than the
//! requested size is appended like any other and the next page is still requested. This
//! costs one extra request when the final page is short, and never stops early if the
//! source returns a short page in the middle.

use crate::model::{FetchError, MemberRecord, PageNumber};

/// Result of applying one fetch outcome to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A non-empty page was stored; the cursor now points at `page`.
    Loaded {
        /// Page that was stored.
        page: PageNumber,
        /// Number of members on that page.
        count: usize,
    },
    /// `page` came back empty; no further fetch will start.
    Exhausted {
        /// Page that came back empty.
        page: PageNumber,
    },
    /// The fetch failed; state is unchanged apart from the in-flight flag.
    Failed {
        /// Page that failed and will be requested again.
        page: PageNumber,
    },
    /// The outcome did not belong to the fetch in flight and was dropped.
    Ignored,
}

/// Accumulated directory state for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    members: Vec<MemberRecord>,
    cursor: PageNumber,
    first_page_loaded: bool,
    in_flight: Option<PageNumber>,
    exhausted: bool,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListState {
    /// Fresh state: cursor at page 1, no members, idle, not exhausted.
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            cursor: PageNumber::first(),
            first_page_loaded: false,
            in_flight: None,
            exhausted: false,
        }
    }

    /// Members loaded so far, in page order.
    pub fn members(&self) -> &[MemberRecord] {
        &self.members
    }

    /// Last page successfully loaded (1 before anything has loaded).
    pub fn cursor(&self) -> PageNumber {
        self.cursor
    }

    /// True while a fetch is outstanding.
    pub fn fetch_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Page currently being fetched, if any.
    pub fn in_flight_page(&self) -> Option<PageNumber> {
        self.in_flight
    }

    /// True once an empty page has been seen. Never reset.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// True if a fetch may start now.
    pub fn can_fetch(&self) -> bool {
        !self.exhausted && self.in_flight.is_none()
    }

    /// Page the next fetch will request.
    ///
    /// Page 1 until it has loaded successfully (a failed first request is retried as
    /// page 1), then `cursor + 1`.
    pub fn next_page(&self) -> PageNumber {
        if self.first_page_loaded {
            self.cursor.next()
        } else {
            PageNumber::first()
        }
    }

    /// Guarded `Idle -> Fetching` transition.
    ///
    /// Returns the page to request, or `None` (with no state change) if a fetch is
    /// already in flight or the list is exhausted.
    pub fn begin_fetch(&mut self) -> Option<PageNumber> {
        if !self.can_fetch() {
            return None;
        }
        let page = self.next_page();
        self.in_flight = Some(page);
        Some(page)
    }

    /// `Fetching -> Idle` transition for the fetch of `page`.
    ///
    /// Outcomes for any page other than the one in flight are ignored.
    pub fn complete(
        &mut self,
        page: PageNumber,
        result: Result<Vec<MemberRecord>, FetchError>,
    ) -> Transition {
        if self.in_flight != Some(page) {
            return Transition::Ignored;
        }
        self.in_flight = None;

        match result {
            Ok(records) if records.is_empty() => {
                self.exhausted = true;
                Transition::Exhausted { page }
            }
            Ok(records) => {
                let count = records.len();
                if page.is_first() {
                    self.members = records;
                } else {
                    self.members.extend(records);
                }
                self.cursor = page;
                self.first_page_loaded = true;
                Transition::Loaded { page, count }
            }
            Err(_) => Transition::Failed { page },
        }
    }

    /// Borrowed read-only view for presentation.
    pub fn snapshot(&self) -> ListSnapshot<'_> {
        ListSnapshot {
            members: &self.members,
            cursor: self.cursor,
            fetch_in_flight: self.fetch_in_flight(),
            exhausted: self.exhausted,
        }
    }
}

/// Immutable view of a [`ListState`], taken after each mutation for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSnapshot<'a> {
    /// Members loaded so far.
    pub members: &'a [MemberRecord],
    /// Last page loaded.
    pub cursor: PageNumber,
    /// True while a fetch is outstanding.
    pub fetch_in_flight: bool,
    /// True once the source has no more pages.
    pub exhausted: bool,
}

#[cfg(test)]
#[path = "list_state_tests.rs"]
mod tests;
