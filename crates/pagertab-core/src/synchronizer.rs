#![forbid(unsafe_code)]

//! Scroll synchronization for the tab strip.
//!
//! Decides where the scrollable row should move when the selection changes:
//! center the selected tab when enough content follows it, otherwise snap to
//! the end of the strip so centering never overshoots the last item.
//!
//! Also tracks the one-time "layout settled" transition and owns the
//! [`RecenterRetry`], a one-shot deferred re-application of the scroll
//! decision shortly after the strip first appears. Some hosts cannot center
//! content reliably on their very first layout pass; the retry covers that.

use std::time::Duration;

use web_time::Instant;

use crate::registry::TabWidthRegistry;
use crate::style::PagerStyle;

/// Where the requested tab should land in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollAnchor {
    /// Center the tab in the viewport.
    Center,
    /// Align the end of the strip with the end of the viewport.
    End,
}

impl ScrollAnchor {
    /// Stable lowercase name, used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

/// A scroll request for the tab row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollTarget {
    /// Tab to scroll to.
    pub index: usize,
    /// Placement of that tab.
    pub anchor: ScrollAnchor,
}

impl ScrollTarget {
    /// Center `index`.
    #[must_use]
    pub const fn center(index: usize) -> Self {
        Self {
            index,
            anchor: ScrollAnchor::Center,
        }
    }

    /// Snap to the end at `index` (the last tab).
    #[must_use]
    pub const fn end(index: usize) -> Self {
        Self {
            index,
            anchor: ScrollAnchor::End,
        }
    }
}

/// Chooses scroll targets and detects the layout-settled transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSynchronizer {
    spacing: f64,
    settled: bool,
}

impl ScrollSynchronizer {
    /// Create a synchronizer from the strip style.
    #[must_use]
    pub fn new(style: &PagerStyle) -> Self {
        Self {
            spacing: style.tab_item_spacing,
            settled: false,
        }
    }

    /// Whether the settled transition has already been observed.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Content from the center of `selected` to the end of the strip:
    /// half its width, every following width, and the gaps between them.
    #[must_use]
    pub fn remaining_width(&self, registry: &TabWidthRegistry, selected: usize) -> f64 {
        let count = registry.items_count();
        if selected >= count {
            return 0.0;
        }
        let gaps = (count - 1 - selected) as f64;
        registry.width_or_zero(selected) / 2.0 + registry.width_after(selected) + self.spacing * gaps
    }

    /// Scroll decision after the selection moved to `selected`.
    ///
    /// The last tab always snaps to the end, whatever the viewport width.
    ///
    /// Returns `None` for an empty strip or an out-of-range selection; the
    /// presentation layer would ignore such a request anyway.
    #[must_use]
    pub fn on_selection_changed(
        &self,
        registry: &TabWidthRegistry,
        selected: usize,
        viewport_width: f64,
    ) -> Option<ScrollTarget> {
        let count = registry.items_count();
        if selected >= count {
            return None;
        }
        let remaining_width = self.remaining_width(registry, selected);
        let is_last = selected + 1 == count;
        let target = if !is_last && remaining_width > viewport_width / 2.0 {
            ScrollTarget::center(selected)
        } else {
            ScrollTarget::end(count - 1)
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "pagertab.scroll",
            index = target.index,
            anchor = target.anchor.as_str(),
            remaining_width,
            viewport_width
        );
        Some(target)
    }

    /// Observe the registry after a width update.
    ///
    /// Returns `true` exactly once: on the first call that sees every tab
    /// measured. The caller then re-applies the selected tab's indicator
    /// geometry, covering a selection made before any width was known.
    pub fn observe_layout(&mut self, registry: &TabWidthRegistry) -> bool {
        if self.settled || !registry.all_measured() {
            return false;
        }
        self.settled = true;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryState {
    Idle,
    Armed(Instant),
    Fired,
    /// Deadline past the clock's range.
    Retired,
}

/// One-shot deferred recentering after first appearance.
///
/// Arms once, fires once, cannot be cancelled. Time is supplied by the host
/// so the retry is deterministic under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecenterRetry {
    delay: Option<Duration>,
    state: RetryState,
}

impl RecenterRetry {
    /// Retry `delay` after scheduling; `None` disables it.
    #[must_use]
    pub const fn new(delay: Option<Duration>) -> Self {
        Self {
            delay,
            state: RetryState::Idle,
        }
    }

    /// Retry configured by `style.recenter_delay_ms`.
    #[must_use]
    pub fn from_style(style: &PagerStyle) -> Self {
        Self::new(style.recenter_delay_duration())
    }

    /// Arm the retry relative to `now`. Only the first call has an effect.
    ///
    /// Returns `true` if the retry was armed by this call. A deadline past
    /// the clock's range can never fire, so the retry is retired instead.
    pub fn schedule(&mut self, now: Instant) -> bool {
        let (RetryState::Idle, Some(delay)) = (self.state, self.delay) else {
            return false;
        };
        match now.checked_add(delay) {
            Some(deadline) => {
                self.state = RetryState::Armed(deadline);
                true
            }
            None => {
                self.state = RetryState::Retired;
                false
            }
        }
    }

    /// Deadline of an armed retry.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            RetryState::Armed(deadline) => Some(deadline),
            _ => None,
        }
    }

    /// Whether the retry has already fired.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.state == RetryState::Fired
    }

    /// Fire if the deadline has passed. Returns `true` at most once.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            RetryState::Armed(deadline) if now >= deadline => {
                self.state = RetryState::Fired;
                true
            }
            _ => false,
        }
    }
}
