//! Session-scoped pagination controller.
//!
//! Drives a [`ListState`] against a [`MemberSource`]. Fetches run as tokio tasks; their
//! results come back over a channel owned by this controller and are applied by the
//! thread that owns it, which is the only writer of the list.
//!
//! Dropping the controller drops the receiving end of its channel, so a fetch that
//! completes after the session is gone has nowhere to deliver and is discarded.

use super::list_state::{ListSnapshot, ListState, Transition};
use crate::model::{FetchError, MemberRecord, PageNumber};
use crate::source::MemberSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, info, warn};

/// Default number of members requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default pause before each network call so the loading state is visible.
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(500);

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Identifies the controller instance a fetch was issued by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(u64);

impl SessionToken {
    fn next() -> Self {
        Self(NEXT_SESSION.fetch_add(1, Ordering::Relaxed))
    }
}

/// Tunables for page fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSettings {
    /// Members requested per page.
    pub page_size: usize,
    /// Artificial delay before every network call. Zero disables it.
    pub fetch_delay: Duration,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            fetch_delay: DEFAULT_FETCH_DELAY,
        }
    }
}

/// What a call to [`PaginationController::request_next_page`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A fetch for this page was dispatched.
    Started(PageNumber),
    /// No-op: a fetch is already outstanding.
    AlreadyFetching,
    /// No-op: the source has no more pages.
    Exhausted,
}

impl RequestOutcome {
    /// True if a fetch was dispatched.
    pub fn started(self) -> bool {
        matches!(self, RequestOutcome::Started(_))
    }
}

/// Result of one fetch task, addressed to the session that issued it.
#[derive(Debug)]
pub struct PageCompletion {
    session: SessionToken,
    page: PageNumber,
    result: Result<Vec<MemberRecord>, FetchError>,
}

impl PageCompletion {
    #[cfg(test)]
    pub(crate) fn new(
        session: SessionToken,
        page: PageNumber,
        result: Result<Vec<MemberRecord>, FetchError>,
    ) -> Self {
        Self {
            session,
            page,
            result,
        }
    }

    /// Page this completion answers.
    pub fn page(&self) -> PageNumber {
        self.page
    }
}

/// Owns one session's list and issues at most one fetch at a time.
pub struct PaginationController {
    session: SessionToken,
    list: ListState,
    source: Arc<dyn MemberSource>,
    settings: PaginationSettings,
    runtime: Handle,
    last_error: Option<FetchError>,
    completions_tx: mpsc::UnboundedSender<PageCompletion>,
    completions_rx: mpsc::UnboundedReceiver<PageCompletion>,
}

impl std::fmt::Debug for PaginationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationController")
            .field("session", &self.session)
            .field("list", &self.list)
            .field("settings", &self.settings)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl PaginationController {
    /// Create a controller without fetching anything.
    pub fn new(source: Arc<dyn MemberSource>, settings: PaginationSettings, runtime: Handle) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            session: SessionToken::next(),
            list: ListState::new(),
            source,
            settings,
            runtime,
            last_error: None,
            completions_tx,
            completions_rx,
        }
    }

    /// Create a controller and immediately request page 1.
    pub fn mount(source: Arc<dyn MemberSource>, settings: PaginationSettings, runtime: Handle) -> Self {
        let mut controller = Self::new(source, settings, runtime);
        info!(
            session = controller.session.0,
            page_size = settings.page_size,
            "Directory session mounted"
        );
        controller.request_next_page();
        controller
    }

    /// Token identifying this session's fetches.
    pub fn session(&self) -> SessionToken {
        self.session
    }

    /// Settings this controller fetches with.
    pub fn settings(&self) -> PaginationSettings {
        self.settings
    }

    /// Read-only state for rendering.
    pub fn snapshot(&self) -> ListSnapshot<'_> {
        self.list.snapshot()
    }

    /// Underlying list state.
    pub fn list(&self) -> &ListState {
        &self.list
    }

    /// Error from the most recent failed fetch, cleared by the next success.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Start fetching the next page unless a fetch is outstanding or the list is
    /// exhausted. Safe to over-call: guarded calls have no effect.
    pub fn request_next_page(&mut self) -> RequestOutcome {
        if self.list.is_exhausted() {
            debug!(session = self.session.0, "Next page not requested: exhausted");
            return RequestOutcome::Exhausted;
        }
        let Some(page) = self.list.begin_fetch() else {
            debug!(session = self.session.0, "Next page not requested: fetch in flight");
            return RequestOutcome::AlreadyFetching;
        };

        self.spawn_fetch(page);
        RequestOutcome::Started(page)
    }

    fn spawn_fetch(&self, page: PageNumber) {
        let source = Arc::clone(&self.source);
        let tx = self.completions_tx.clone();
        let session = self.session;
        let PaginationSettings {
            page_size,
            fetch_delay,
        } = self.settings;

        debug!(session = session.0, %page, page_size, "Fetching member page");
        self.runtime.spawn(async move {
            if !fetch_delay.is_zero() {
                tokio::time::sleep(fetch_delay).await;
            }
            let result = source.fetch_page(page, page_size).await;
            let completion = PageCompletion {
                session,
                page,
                result,
            };
            if tx.send(completion).is_err() {
                debug!(session = session.0, %page, "Session closed; discarding page result");
            }
        });
    }

    /// Apply every completion that has already arrived, without waiting.
    ///
    /// Returns true if anything was applied (the view should redraw).
    pub fn poll_completions(&mut self) -> bool {
        let mut applied = false;
        loop {
            match self.completions_rx.try_recv() {
                Ok(completion) => {
                    self.apply(completion);
                    applied = true;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    /// Wait for the next completion and apply it.
    pub async fn next_completion(&mut self) -> Option<Transition> {
        let completion = self.completions_rx.recv().await?;
        Some(self.apply(completion))
    }

    /// Apply one completion if it belongs to this session.
    pub fn apply(&mut self, completion: PageCompletion) -> Transition {
        if completion.session != self.session {
            debug!(
                session = self.session.0,
                foreign = completion.session.0,
                "Dropping completion addressed to another session"
            );
            return Transition::Ignored;
        }

        if let Err(err) = &completion.result {
            warn!(
                session = self.session.0,
                page = %completion.page,
                transport = err.is_transport(),
                error = %err,
                "Failed to load member page; next scroll will retry"
            );
        }

        let failure = completion.result.as_ref().err().cloned();
        let transition = self.list.complete(completion.page, completion.result);
        match &transition {
            Transition::Failed { .. } => self.last_error = failure,
            Transition::Loaded { .. } | Transition::Exhausted { .. } => self.last_error = None,
            Transition::Ignored => {}
        }
        match &transition {
            Transition::Loaded { page, count } => info!(
                session = self.session.0,
                %page,
                count,
                total = self.list.members().len(),
                "Member page loaded"
            ),
            Transition::Exhausted { page } => info!(
                session = self.session.0,
                %page,
                total = self.list.members().len(),
                "Directory exhausted"
            ),
            Transition::Failed { .. } => {}
            Transition::Ignored => debug!(
                session = self.session.0,
                page = %completion.page,
                "Ignoring completion for a page not in flight"
            ),
        }
        transition
    }
}

impl Drop for PaginationController {
    fn drop(&mut self) {
        info!(
            session = self.session.0,
            members = self.list.members().len(),
            in_flight = self.list.fetch_in_flight(),
            "Directory session unmounted"
        );
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
