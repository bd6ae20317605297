//! Acceptance scenarios for the pagination controller, with the default fetch delay.
//!
//! Time is paused, so the 500 ms delay before each request elapses instantly but
//! still orders events the way a real session would see them.
//!
//! Test scenarios:
//! A. Mounting fetches page 1 on its own
//! B. Scrolling past the threshold appends page 2
//! C. An empty page exhausts the directory; later scrolling makes no calls
//! D. A failed fetch leaves the list untouched and the same page is asked for again

use async_trait::async_trait;
use roster::model::{FetchError, MemberRecord, PageNumber};
use roster::source::MemberSource;
use roster::state::{
    PaginationController, PaginationSettings, RequestOutcome, ScrollMetrics, ScrollTrigger,
    Transition,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const THRESHOLD: usize = 8;

/// In-memory directory of `total` members that can fail chosen pages once.
struct DirectorySource {
    total: usize,
    fail_once: Mutex<HashSet<u32>>,
    calls: Mutex<Vec<u32>>,
}

impl DirectorySource {
    fn new(total: usize) -> Self {
        Self {
            total,
            fail_once: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing_once(self, page: u32) -> Self {
        self.fail_once.lock().unwrap().insert(page);
        self
    }

    fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MemberSource for DirectorySource {
    async fn fetch_page(
        &self,
        page: PageNumber,
        page_size: usize,
    ) -> Result<Vec<MemberRecord>, FetchError> {
        self.calls.lock().unwrap().push(page.get());
        if self.fail_once.lock().unwrap().remove(&page.get()) {
            return Err(FetchError::Transport {
                reason: "connection refused".to_string(),
            });
        }

        let start = (page.get() as usize - 1) * page_size;
        let end = (start + page_size).min(self.total);
        Ok((start..end)
            .map(|i| {
                let id = i as u64 + 1;
                MemberRecord::new(
                    id,
                    format!("Member {id}"),
                    format!("member{id}"),
                    format!("member{id}@example.com"),
                    "555-0100",
                    "example.com",
                    "Example Co",
                    "Springfield",
                )
            })
            .collect())
    }
}

fn mount(source: &Arc<DirectorySource>) -> PaginationController {
    PaginationController::mount(
        source.clone(),
        PaginationSettings::default(),
        tokio::runtime::Handle::current(),
    )
}

/// Geometry of `members` four-row cards plus a footer in a 22-row viewport.
fn metrics(members: usize, scroll_top: usize) -> ScrollMetrics {
    ScrollMetrics {
        document_height: members * 4 + 1,
        viewport_height: 22,
        scroll_top,
    }
}

fn at_bottom(members: usize) -> ScrollMetrics {
    let m = metrics(members, 0);
    metrics(members, m.document_height.saturating_sub(m.viewport_height))
}

#[tokio::test(start_paused = true)]
async fn scenario_a_mount_loads_first_page() {
    let source = Arc::new(DirectorySource::new(50));
    let mut controller = mount(&source);
    assert!(controller.snapshot().fetch_in_flight);

    // Request waits out the delay before reaching the source
    tokio::time::sleep(Duration::from_millis(499)).await;
    assert!(source.calls().is_empty());

    let transition = controller.next_completion().await;
    assert_eq!(
        transition,
        Some(Transition::Loaded {
            page: PageNumber::FIRST,
            count: 10
        })
    );

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.members.len(), 10);
    assert_eq!(snapshot.cursor, PageNumber::FIRST);
    assert!(!snapshot.exhausted);
    assert!(!snapshot.fetch_in_flight);
}

#[tokio::test(start_paused = true)]
async fn scenario_b_crossing_threshold_appends_next_page() {
    let source = Arc::new(DirectorySource::new(50));
    let mut controller = mount(&source);
    controller.next_completion().await;
    let mut trigger = ScrollTrigger::attach(THRESHOLD);

    // 41-row document, 22-row viewport: top 10 leaves 9 rows below
    assert_eq!(trigger.on_scroll(metrics(10, 10), &mut controller), None);
    let outcome = trigger.on_scroll(metrics(10, 11), &mut controller);
    assert_eq!(
        outcome,
        Some(RequestOutcome::Started(PageNumber::new(2).unwrap()))
    );

    controller.next_completion().await;
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.members.len(), 20);
    assert_eq!(snapshot.cursor.get(), 2);
    assert_eq!(snapshot.members[10].name(), "Member 11");
    assert_eq!(source.calls(), vec![1, 2]);
}

#[tokio::test(start_paused = true)]
async fn scenario_c_empty_page_exhausts_directory() {
    let source = Arc::new(DirectorySource::new(20));
    let mut controller = mount(&source);
    controller.next_completion().await;
    let mut trigger = ScrollTrigger::attach(THRESHOLD);

    trigger.on_scroll(at_bottom(10), &mut controller);
    controller.next_completion().await;
    trigger.on_scroll(at_bottom(20), &mut controller);
    let transition = controller.next_completion().await;

    assert_eq!(
        transition,
        Some(Transition::Exhausted {
            page: PageNumber::new(3).unwrap()
        })
    );
    let snapshot = controller.snapshot();
    assert!(snapshot.exhausted);
    assert_eq!(snapshot.members.len(), 20);
    assert_eq!(snapshot.cursor.get(), 2);

    for _ in 0..5 {
        assert_eq!(trigger.on_scroll(at_bottom(20), &mut controller), None);
    }
    assert_eq!(controller.request_next_page(), RequestOutcome::Exhausted);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(source.calls(), vec![1, 2, 3]);
}

#[tokio::test(start_paused = true)]
async fn scenario_d_failed_fetch_is_retried_for_same_page() {
    let source = Arc::new(DirectorySource::new(50).failing_once(2));
    let mut controller = mount(&source);
    controller.next_completion().await;
    let mut trigger = ScrollTrigger::attach(THRESHOLD);

    trigger.on_scroll(at_bottom(10), &mut controller);
    let transition = controller.next_completion().await;
    assert_eq!(
        transition,
        Some(Transition::Failed {
            page: PageNumber::new(2).unwrap()
        })
    );

    let snapshot = controller.snapshot();
    assert!(!snapshot.fetch_in_flight);
    assert!(!snapshot.exhausted);
    assert_eq!(snapshot.members.len(), 10);
    assert_eq!(snapshot.cursor, PageNumber::FIRST);
    assert!(controller.last_error().is_some_and(FetchError::is_transport));

    let retry = trigger.on_scroll(at_bottom(10), &mut controller);
    assert_eq!(
        retry,
        Some(RequestOutcome::Started(PageNumber::new(2).unwrap()))
    );
    controller.next_completion().await;

    assert_eq!(controller.snapshot().members.len(), 20);
    assert!(controller.last_error().is_none());
    assert_eq!(source.calls(), vec![1, 2, 2]);
}

#[tokio::test(start_paused = true)]
async fn failed_first_page_is_retried_as_first_page() {
    let source = Arc::new(DirectorySource::new(50).failing_once(1));
    let mut controller = mount(&source);
    controller.next_completion().await;
    assert!(controller.snapshot().members.is_empty());

    // Empty list is always within reach of the bottom
    let mut trigger = ScrollTrigger::attach(THRESHOLD);
    let retry = trigger.on_scroll(metrics(0, 0), &mut controller);
    assert_eq!(retry, Some(RequestOutcome::Started(PageNumber::FIRST)));

    controller.next_completion().await;
    assert_eq!(controller.snapshot().members.len(), 10);
    assert_eq!(source.calls(), vec![1, 1]);
}
