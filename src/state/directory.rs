//! Directory session: one mounted member list with its scroll position.
//!
//! Created when the credential gate accepts, destroyed on logout. Owns the pagination
//! controller and the scroll trigger, so both live exactly as long as the view.

use super::list_state::ListSnapshot;
use super::pagination::{PaginationController, PaginationSettings, RequestOutcome};
use super::scroll_trigger::{ScrollMetrics, ScrollTrigger};
use crate::model::KeyAction;
use crate::source::MemberSource;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Rows each member occupies in the list (three text rows and a spacer).
pub const MEMBER_ROW_HEIGHT: usize = 4;

/// Rows below the last member for the loading / end-of-list footer.
pub const FOOTER_HEIGHT: usize = 1;

/// Rows moved per mouse wheel notch.
pub const WHEEL_STEP: usize = 3;

/// Everything needed to mount a directory session.
#[derive(Clone)]
pub struct DirectoryConfig {
    /// Where pages come from.
    pub source: Arc<dyn MemberSource>,
    /// Page size and artificial delay.
    pub settings: PaginationSettings,
    /// Scroll trigger proximity, in rows.
    pub scroll_threshold: usize,
    /// Runtime the fetch tasks are spawned on.
    pub runtime: Handle,
}

impl std::fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("settings", &self.settings)
            .field("scroll_threshold", &self.scroll_threshold)
            .finish_non_exhaustive()
    }
}

/// A mounted member list.
#[derive(Debug)]
pub struct DirectorySession {
    controller: PaginationController,
    trigger: ScrollTrigger,
    scroll_top: usize,
    viewport_height: usize,
}

impl DirectorySession {
    /// Mount: attach the scroll trigger and request page 1.
    pub fn mount(config: &DirectoryConfig) -> Self {
        let controller = PaginationController::mount(
            Arc::clone(&config.source),
            config.settings,
            config.runtime.clone(),
        );
        Self {
            controller,
            trigger: ScrollTrigger::attach(config.scroll_threshold),
            scroll_top: 0,
            viewport_height: 0,
        }
    }

    /// Read-only list state.
    pub fn snapshot(&self) -> ListSnapshot<'_> {
        self.controller.snapshot()
    }

    /// Pagination controller.
    pub fn controller(&self) -> &PaginationController {
        &self.controller
    }

    /// Mutable pagination controller.
    pub fn controller_mut(&mut self) -> &mut PaginationController {
        &mut self.controller
    }

    /// Scroll trigger.
    pub fn trigger(&self) -> &ScrollTrigger {
        &self.trigger
    }

    /// Offset of the first visible row.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Height of the list viewport last reported by the view.
    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Record the list viewport height and re-clamp the offset.
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
    }

    /// Total rows of rendered content, footer included.
    pub fn document_height(&self) -> usize {
        self.snapshot().members.len() * MEMBER_ROW_HEIGHT + FOOTER_HEIGHT
    }

    fn max_scroll_top(&self) -> usize {
        self.document_height().saturating_sub(self.viewport_height)
    }

    /// Current scroll geometry.
    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            document_height: self.document_height(),
            viewport_height: self.viewport_height,
            scroll_top: self.scroll_top,
        }
    }

    /// Apply a scroll action, then deliver a scroll event to the trigger.
    ///
    /// The event fires even when the clamped offset did not move, so pressing
    /// "down" at the bottom of a short list still asks for more.
    pub fn scroll(&mut self, action: KeyAction) -> Option<RequestOutcome> {
        let page = self.viewport_height.max(1);
        let target = match action {
            KeyAction::ScrollUp => self.scroll_top.saturating_sub(1),
            KeyAction::ScrollDown => self.scroll_top.saturating_add(1),
            KeyAction::PageUp => self.scroll_top.saturating_sub(page),
            KeyAction::PageDown => self.scroll_top.saturating_add(page),
            KeyAction::ScrollToTop => 0,
            KeyAction::ScrollToBottom => usize::MAX,
            _ => return None,
        };
        self.scroll_to(target)
    }

    /// Scroll by a signed number of rows (mouse wheel).
    pub fn scroll_by(&mut self, delta: isize) -> Option<RequestOutcome> {
        let target = self.scroll_top.saturating_add_signed(delta);
        self.scroll_to(target)
    }

    fn scroll_to(&mut self, target: usize) -> Option<RequestOutcome> {
        self.scroll_top = target.min(self.max_scroll_top());
        let metrics = self.metrics();
        self.trigger.on_scroll(metrics, &mut self.controller)
    }

    /// Apply arrived fetch results. Returns true if the view should redraw.
    pub fn poll(&mut self) -> bool {
        let changed = self.controller.poll_completions();
        if changed {
            self.scroll_top = self.scroll_top.min(self.max_scroll_top());
        }
        changed
    }
}
