#![forbid(unsafe_code)]

//! Scrollable navigation bar controller.
//!
//! [`ScrollableNavBar`] is the event dispatcher for one tab strip. The host
//! forwards discrete UI events to it and renders what it publishes:
//!
//! | Event                  | Effect                                             |
//! |------------------------|----------------------------------------------------|
//! | `on_width_measured`    | registry update → indicator recomputed             |
//! | `on_content_offset`    | drag offset → indicator interpolated               |
//! | `on_viewport_width`    | indicator recomputed                               |
//! | `tap` / `finish_swipe` | selection write → indicator snaps, scroll request  |
//! | `appear` + `tick`      | one-shot delayed recentering                       |
//!
//! Outputs are an [`Observable`] indicator geometry and an [`Emitter`] of
//! [`ScrollTarget`] requests. While no scroll handler is subscribed, requests
//! are queued instead for hosts that poll with
//! [`take_scroll_requests`](ScrollableNavBar::take_scroll_requests).
//!
//! Everything runs on the UI thread; handlers never block and never fail.

use std::cell::RefCell;
use std::rc::Rc;

use pagertab_core::{
    BarRect, DragOffset, IndicatorGeometry, IndicatorPositioner, PagerStyle, RecenterRetry,
    ScrollSynchronizer, ScrollTarget, TabWidthRegistry,
};
use tracing::{debug, trace};
use web_time::Instant;

use crate::reactive::{Emitter, Observable, Subscription};
use crate::selection::{SelectionCell, SelectionHandle};

/// Mutable state behind the controller. Borrowed only for the duration of a
/// single computation, never while outputs are being published.
struct NavBarState {
    style: PagerStyle,
    registry: TabWidthRegistry,
    positioner: IndicatorPositioner,
    synchronizer: ScrollSynchronizer,
    retry: RecenterRetry,
    content_offset: Option<f64>,
    viewport_width: f64,
    appeared: bool,
    pending_scrolls: Vec<ScrollTarget>,
}

impl NavBarState {
    fn drag_offset(&self, selected: usize) -> DragOffset {
        match self.content_offset {
            Some(offset) => DragOffset::from_content_offset(offset, self.viewport_width, selected),
            None => DragOffset::SETTLED,
        }
    }

    fn live_geometry(&self, selected: usize) -> IndicatorGeometry {
        self.positioner
            .geometry(&self.registry, selected, self.drag_offset(selected))
    }

    fn snapped_geometry(&self, selected: usize) -> IndicatorGeometry {
        self.positioner
            .geometry(&self.registry, selected, DragOffset::SETTLED)
    }

    fn scroll_to(&self, selected: usize) -> Option<ScrollTarget> {
        let target =
            self.synchronizer
                .on_selection_changed(&self.registry, selected, self.viewport_width)?;
        trace!(
            message = "pagertab.scroll.request",
            index = target.index,
            anchor = target.anchor.as_str()
        );
        Some(target)
    }
}

/// Hand `target` to the scroll handlers, or queue it when none is live.
///
/// Must be called with no borrow of `state` held: handlers may call back
/// into the strip.
fn publish_scroll(
    state: &RefCell<NavBarState>,
    scroll: &Emitter<ScrollTarget>,
    target: ScrollTarget,
) {
    if scroll.emit(&target) == 0 {
        state.borrow_mut().pending_scrolls.push(target);
    }
}

/// Controller for a horizontally scrollable tab strip with a sliding
/// indicator.
pub struct ScrollableNavBar {
    state: Rc<RefCell<NavBarState>>,
    selection: SelectionCell,
    indicator: Observable<IndicatorGeometry>,
    scroll: Emitter<ScrollTarget>,
    _selection_sub: Subscription,
}

impl std::fmt::Debug for ScrollableNavBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ScrollableNavBar")
            .field("items_count", &state.registry.items_count())
            .field("selected", &self.selection.get())
            .field("indicator", &self.indicator.get())
            .field("settled", &state.synchronizer.is_settled())
            .finish_non_exhaustive()
    }
}

impl ScrollableNavBar {
    /// Controller for `items_count` tabs with its own selection at 0.
    #[must_use]
    pub fn new(items_count: usize, style: PagerStyle) -> Self {
        Self::with_selection(SelectionCell::new(0, items_count), style)
    }

    /// Controller sharing `selection` with a paged container.
    ///
    /// The number of tabs is the selection's page count.
    #[must_use]
    pub fn with_selection(selection: SelectionCell, style: PagerStyle) -> Self {
        let state = Rc::new(RefCell::new(NavBarState {
            registry: TabWidthRegistry::new(selection.items_count(), style.tab_item_spacing),
            positioner: IndicatorPositioner::new(&style),
            synchronizer: ScrollSynchronizer::new(&style),
            retry: RecenterRetry::from_style(&style),
            style,
            content_offset: None,
            viewport_width: 0.0,
            appeared: false,
            pending_scrolls: Vec::new(),
        }));
        let indicator = Observable::new(IndicatorGeometry::ZERO);
        let scroll = Emitter::new();

        let weak = Rc::downgrade(&state);
        let indicator_out = indicator.clone();
        let scroll_out = scroll.clone();
        let selection_sub = selection.subscribe(move |selected| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let (geometry, target) = {
                let mut state = state.borrow_mut();
                // The last reported offset was relative to the old page.
                state.content_offset = None;
                (state.snapped_geometry(selected), state.scroll_to(selected))
            };
            indicator_out.set(geometry);
            if let Some(target) = target {
                publish_scroll(&state, &scroll_out, target);
            }
        });

        Self {
            state,
            selection,
            indicator,
            scroll,
            _selection_sub: selection_sub,
        }
    }

    // --- Inputs -------------------------------------------------------------

    /// The item renderer measured tab `index` at `width`.
    ///
    /// Out-of-range indices and non-positive widths are ignored. The first
    /// update that completes the layout snaps the indicator onto the
    /// selected tab.
    pub fn on_width_measured(&self, index: usize, width: f64) {
        let selected = self.selection.get();
        let geometry = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            if !state.registry.set_width(index, width) {
                return;
            }
            if state.synchronizer.observe_layout(&state.registry) {
                debug!(
                    message = "pagertab.layout.settled",
                    items_count = state.registry.items_count(),
                    selected
                );
                state.snapped_geometry(selected)
            } else {
                state.live_geometry(selected)
            }
        };
        self.indicator.set(geometry);
    }

    /// The paged container scrolled to `content_offset` (page-width units
    /// times the viewport width; `-viewport_width * page` when settled).
    ///
    /// A selection write discards the last offset, so the indicator stays
    /// snapped until the container reports again.
    pub fn on_content_offset(&self, content_offset: f64) {
        let selected = self.selection.get();
        let geometry = {
            let mut state = self.state.borrow_mut();
            state.content_offset = Some(content_offset);
            state.live_geometry(selected)
        };
        self.indicator.set(geometry);
    }

    /// The paged container's viewport width changed.
    pub fn on_viewport_width(&self, viewport_width: f64) {
        let selected = self.selection.get();
        let geometry = {
            let mut state = self.state.borrow_mut();
            state.viewport_width = viewport_width;
            state.live_geometry(selected)
        };
        self.indicator.set(geometry);
    }

    /// A tab was tapped. Returns `true` if the selection changed.
    pub fn tap(&self, index: usize) -> bool {
        self.selection.tap(index)
    }

    /// The paged container settled on `index` after a swipe. Returns `true`
    /// if the selection changed.
    pub fn finish_swipe(&self, index: usize) -> bool {
        self.selection.finish_swipe(index)
    }

    /// The strip appeared on screen.
    ///
    /// The first call arms the recentering retry. With the retry disabled,
    /// the scroll decision for the current selection is applied at once.
    pub fn appear(&self, now: Instant) {
        let selected = self.selection.get();
        let target = {
            let mut state = self.state.borrow_mut();
            if state.appeared {
                return;
            }
            state.appeared = true;
            if state.retry.schedule(now) {
                debug!(
                    message = "pagertab.recenter.armed",
                    delay_ms = state.style.recenter_delay_ms.unwrap_or(0)
                );
                None
            } else {
                state.scroll_to(selected)
            }
        };
        if let Some(target) = target {
            publish_scroll(&self.state, &self.scroll, target);
        }
    }

    /// Advance host time. Fires the recentering retry once its deadline has
    /// passed; returns `true` on that call only.
    pub fn tick(&self, now: Instant) -> bool {
        let selected = self.selection.get();
        let target = {
            let mut state = self.state.borrow_mut();
            if !state.retry.poll(now) {
                return false;
            }
            debug!(message = "pagertab.recenter.fired", selected);
            state.scroll_to(selected)
        };
        if let Some(target) = target {
            publish_scroll(&self.state, &self.scroll, target);
        }
        true
    }

    // --- Outputs ------------------------------------------------------------

    /// Current indicator geometry.
    #[must_use]
    pub fn indicator(&self) -> IndicatorGeometry {
        self.indicator.get()
    }

    /// Observe indicator geometry changes.
    pub fn subscribe_indicator(
        &self,
        callback: impl Fn(&IndicatorGeometry) + 'static,
    ) -> Subscription {
        self.indicator.subscribe(callback)
    }

    /// Drawable bar rectangle for the current indicator.
    #[must_use]
    pub fn bar_rect(&self) -> BarRect {
        BarRect::for_indicator(self.indicator.get(), &self.state.borrow().style)
    }

    /// Observe scroll requests as they are made.
    ///
    /// While at least one handler is live, requests go to the handlers only
    /// and nothing is queued.
    pub fn subscribe_scroll(&self, callback: impl Fn(&ScrollTarget) + 'static) -> Subscription {
        self.scroll.subscribe(callback)
    }

    /// Drain scroll requests made while no scroll handler was subscribed,
    /// in emission order.
    pub fn take_scroll_requests(&self) -> Vec<ScrollTarget> {
        std::mem::take(&mut self.state.borrow_mut().pending_scrolls)
    }

    // --- State --------------------------------------------------------------

    /// Read-only selection view.
    #[must_use]
    pub fn selection(&self) -> SelectionHandle {
        self.selection.handle()
    }

    /// Writable selection, for the paged container.
    #[must_use]
    pub fn selection_cell(&self) -> SelectionCell {
        self.selection.clone()
    }

    /// Currently selected index.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selection.get()
    }

    /// Number of tabs.
    #[must_use]
    pub fn items_count(&self) -> usize {
        self.state.borrow().registry.items_count()
    }

    /// Current drag offset relative to the selection.
    #[must_use]
    pub fn drag_offset(&self) -> DragOffset {
        self.state.borrow().drag_offset(self.selection.get())
    }

    /// Whether every tab has been measured.
    #[must_use]
    pub fn is_layout_settled(&self) -> bool {
        self.state.borrow().synchronizer.is_settled()
    }

    /// Read the width registry.
    pub fn with_registry<R>(&self, f: impl FnOnce(&TabWidthRegistry) -> R) -> R {
        f(&self.state.borrow().registry)
    }

    /// The style this strip was built with.
    #[must_use]
    pub fn style(&self) -> PagerStyle {
        self.state.borrow().style.clone()
    }

    /// Deadline of the armed recentering retry, if any.
    #[must_use]
    pub fn recenter_deadline(&self) -> Option<Instant> {
        self.state.borrow().retry.deadline()
    }
}
