//! Tests for the pure pagination state machine.

use super::*;

// ===== Test Helpers =====

fn member(id: u64) -> MemberRecord {
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
}

fn page_of(start: u64, len: u64) -> Vec<MemberRecord> {
    (start..start + len).map(member).collect()
}

fn page(n: u32) -> PageNumber {
    PageNumber::new(n).unwrap()
}

fn transport_error() -> FetchError {
    FetchError::Transport {
        reason: "connection reset".to_string(),
    }
}

// ===== Initial State =====

#[test]
fn new_state_is_idle_and_empty() {
    let state = ListState::new();

    assert!(state.members().is_empty());
    assert_eq!(state.cursor(), PageNumber::first());
    assert!(!state.fetch_in_flight());
    assert!(!state.is_exhausted());
    assert!(state.can_fetch());
}

#[test]
fn first_fetch_requests_page_one() {
    let mut state = ListState::new();

    assert_eq!(state.begin_fetch(), Some(page(1)));
    assert!(state.fetch_in_flight());
    assert_eq!(state.in_flight_page(), Some(page(1)));
}

// ===== Guard =====

#[test]
fn begin_fetch_is_noop_while_in_flight() {
    let mut state = ListState::new();
    state.begin_fetch();
    let before = state.clone();

    assert_eq!(state.begin_fetch(), None);
    assert_eq!(state, before, "Guarded call must not change state");
}

#[test]
fn begin_fetch_is_noop_when_exhausted() {
    let mut state = ListState::new();
    state.begin_fetch();
    state.complete(page(1), Ok(Vec::new()));
    let before = state.clone();

    assert_eq!(state.begin_fetch(), None);
    assert_eq!(state, before);
}

// ===== Success =====

#[test]
fn page_one_populates_members_and_keeps_cursor_at_one() {
    let mut state = ListState::new();
    state.begin_fetch();

    let transition = state.complete(page(1), Ok(page_of(1, 10)));

    assert_eq!(
        transition,
        Transition::Loaded {
            page: page(1),
            count: 10
        }
    );
    assert_eq!(state.members().len(), 10);
    assert_eq!(state.cursor(), page(1));
    assert!(!state.fetch_in_flight());
    assert!(!state.is_exhausted());
    assert_eq!(state.next_page(), page(2));
}

#[test]
fn later_pages_append_in_order() {
    let mut state = ListState::new();
    state.begin_fetch();
    state.complete(page(1), Ok(page_of(1, 10)));
    assert_eq!(state.begin_fetch(), Some(page(2)));
    state.complete(page(2), Ok(page_of(11, 10)));

    let ids: Vec<u64> = state.members().iter().map(MemberRecord::id).collect();
    assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    assert_eq!(state.cursor(), page(2));
}

#[test]
fn short_page_does_not_exhaust() {
    let mut state = ListState::new();
    state.begin_fetch();
    state.complete(page(1), Ok(page_of(1, 3)));

    assert!(!state.is_exhausted(), "Only an empty page exhausts the list");
    assert_eq!(state.begin_fetch(), Some(page(2)));
}

// ===== Exhaustion =====

#[test]
fn empty_page_exhausts_without_advancing_cursor() {
    let mut state = ListState::new();
    state.begin_fetch();
    state.complete(page(1), Ok(page_of(1, 10)));
    state.begin_fetch();

    let transition = state.complete(page(2), Ok(Vec::new()));

    assert_eq!(transition, Transition::Exhausted { page: page(2) });
    assert!(state.is_exhausted());
    assert_eq!(state.cursor(), page(1));
    assert_eq!(state.members().len(), 10);
    assert!(!state.fetch_in_flight());
}

#[test]
fn empty_first_page_exhausts_immediately() {
    let mut state = ListState::new();
    state.begin_fetch();
    state.complete(page(1), Ok(Vec::new()));

    assert!(state.is_exhausted());
    assert!(state.members().is_empty());
}

// ===== Failure =====

#[test]
fn failure_clears_in_flight_and_keeps_everything_else() {
    let mut state = ListState::new();
    state.begin_fetch();
    state.complete(page(1), Ok(page_of(1, 10)));
    state.begin_fetch();
    let members_before = state.members().to_vec();

    let transition = state.complete(page(2), Err(transport_error()));

    assert_eq!(transition, Transition::Failed { page: page(2) });
    assert!(!state.fetch_in_flight());
    assert_eq!(state.members(), members_before.as_slice());
    assert_eq!(state.cursor(), page(1));
    assert!(!state.is_exhausted());
    assert_eq!(state.begin_fetch(), Some(page(2)), "Same page is retried");
}

#[test]
fn failed_first_page_is_retried_as_page_one() {
    let mut state = ListState::new();
    state.begin_fetch();
    state.complete(
        page(1),
        Err(FetchError::Decode {
            reason: "invalid type".to_string(),
        }),
    );

    assert_eq!(state.begin_fetch(), Some(page(1)));
}

// ===== Stale outcomes =====

#[test]
fn outcome_for_wrong_page_is_ignored() {
    let mut state = ListState::new();
    state.begin_fetch();
    let before = state.clone();

    assert_eq!(state.complete(page(5), Ok(page_of(1, 10))), Transition::Ignored);
    assert_eq!(state, before);
}

#[test]
fn outcome_while_idle_is_ignored() {
    let mut state = ListState::new();
    assert_eq!(state.complete(page(1), Ok(page_of(1, 10))), Transition::Ignored);
    assert!(state.members().is_empty());
}

// ===== Snapshot =====

#[test]
fn snapshot_reflects_state() {
    let mut state = ListState::new();
    state.begin_fetch();

    let snapshot = state.snapshot();
    assert!(snapshot.fetch_in_flight);
    assert!(!snapshot.exhausted);
    assert!(snapshot.members.is_empty());
    assert_eq!(snapshot.cursor, page(1));
}
