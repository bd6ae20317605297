//! Scroll-driven requests for the next page.
//!
//! On every scroll event the trigger measures how far the viewport is from the end of the
//! rendered content; within `threshold` rows it asks the controller for the next page.
//! It pre-checks the snapshot flags to avoid pointless calls, but the controller's own
//! guard is what makes repeated triggering harmless.

use super::list_state::ListSnapshot;
use super::pagination::{PaginationController, RequestOutcome};
use tracing::{debug, trace};

/// Default proximity, in rows, at which the next page is requested.
pub const DEFAULT_SCROLL_THRESHOLD: usize = 8;

/// Scroll geometry, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    /// Total height of the rendered content.
    pub document_height: usize,
    /// Height of the visible area.
    pub viewport_height: usize,
    /// Offset of the first visible row.
    pub scroll_top: usize,
}

impl ScrollMetrics {
    /// `document_height - (viewport_height + scroll_top)`, floored at 0.
    ///
    /// Content shorter than the viewport counts as being at the bottom.
    pub fn distance_from_bottom(&self) -> usize {
        self.document_height
            .saturating_sub(self.viewport_height.saturating_add(self.scroll_top))
    }
}

/// Observer turning scroll events into next-page requests.
///
/// Owned by the directory session; it only receives events while that session exists
/// and detaches when dropped with it.
#[derive(Debug)]
pub struct ScrollTrigger {
    threshold: usize,
    fired: usize,
}

impl ScrollTrigger {
    /// Attach a trigger with the given threshold in rows.
    pub fn attach(threshold: usize) -> Self {
        debug!(threshold, "Scroll trigger attached");
        Self {
            threshold,
            fired: 0,
        }
    }

    /// Proximity threshold in rows.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// How many times this trigger has called the controller.
    pub fn fired(&self) -> usize {
        self.fired
    }

    /// True if the viewport is within the threshold and a fetch could start.
    pub fn should_request(&self, metrics: ScrollMetrics, snapshot: &ListSnapshot<'_>) -> bool {
        metrics.distance_from_bottom() <= self.threshold
            && !snapshot.exhausted
            && !snapshot.fetch_in_flight
    }

    /// Handle one scroll event.
    ///
    /// Returns the controller's answer if it was asked, `None` if the trigger did not fire.
    pub fn on_scroll(
        &mut self,
        metrics: ScrollMetrics,
        controller: &mut PaginationController,
    ) -> Option<RequestOutcome> {
        let fire = self.should_request(metrics, &controller.snapshot());
        trace!(
            distance = metrics.distance_from_bottom(),
            threshold = self.threshold,
            fire,
            "Scroll event"
        );
        if !fire {
            return None;
        }

        self.fired += 1;
        Some(controller.request_next_page())
    }
}

impl Drop for ScrollTrigger {
    fn drop(&mut self) {
        debug!(fired = self.fired, "Scroll trigger detached");
    }
}
