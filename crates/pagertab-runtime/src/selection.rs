#![forbid(unsafe_code)]

//! Shared selection state.
//!
//! The selected page index is shared between the tab strip and the paged
//! container. Exactly two event sources may write it: a tap on a tab and the
//! container reporting a completed swipe. [`SelectionCell`] exposes only
//! those two writers; everything else reads through a [`SelectionHandle`].

use std::cell::Cell;
use std::rc::Rc;

use crate::reactive::{Observable, Subscription};

/// Which event wrote the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionSource {
    /// A tab in the strip was tapped.
    Tap,
    /// The paged container finished a swipe onto a new page.
    Swipe,
}

impl SelectionSource {
    /// Stable lowercase name, used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::Swipe => "swipe",
        }
    }
}

/// Writable selection shared by the strip and the paged container.
///
/// Clones share the same value and subscribers.
#[derive(Debug, Clone)]
pub struct SelectionCell {
    value: Observable<usize>,
    items_count: usize,
    last_source: Rc<Cell<Option<SelectionSource>>>,
}

impl SelectionCell {
    /// Selection over `items_count` pages, starting at `initial` (clamped).
    #[must_use]
    pub fn new(initial: usize, items_count: usize) -> Self {
        Self {
            value: Observable::new(initial.min(items_count.saturating_sub(1))),
            items_count,
            last_source: Rc::new(Cell::new(None)),
        }
    }

    /// Number of selectable pages.
    #[must_use]
    pub fn items_count(&self) -> usize {
        self.items_count
    }

    /// Currently selected index.
    #[must_use]
    pub fn get(&self) -> usize {
        self.value.get()
    }

    /// Source of the most recent effective write.
    #[must_use]
    pub fn last_source(&self) -> Option<SelectionSource> {
        self.last_source.get()
    }

    /// Number of effective writes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.value.version()
    }

    /// Select the tapped tab. Returns `true` if the selection changed.
    pub fn tap(&self, index: usize) -> bool {
        self.write(index, SelectionSource::Tap)
    }

    /// Select the page the container settled on. Returns `true` if the
    /// selection changed.
    pub fn finish_swipe(&self, index: usize) -> bool {
        self.write(index, SelectionSource::Swipe)
    }

    /// Observe selection changes.
    pub fn subscribe(&self, callback: impl Fn(usize) + 'static) -> Subscription {
        self.value.subscribe(move |index| callback(*index))
    }

    /// Read-only view for observers.
    #[must_use]
    pub fn handle(&self) -> SelectionHandle {
        SelectionHandle {
            value: self.value.clone(),
        }
    }

    fn write(&self, index: usize, source: SelectionSource) -> bool {
        if self.items_count == 0 {
            return false;
        }
        let next = index.min(self.items_count - 1);
        let from = self.value.get();
        if from == next {
            return false;
        }
        // Record the source before notifying so subscribers can read it.
        self.last_source.set(Some(source));
        tracing::debug!(
            message = "pagertab.select",
            source = source.as_str(),
            from,
            to = next
        );
        self.value.set(next)
    }
}

/// Read-only view of a [`SelectionCell`].
#[derive(Debug, Clone)]
pub struct SelectionHandle {
    value: Observable<usize>,
}

impl SelectionHandle {
    /// Currently selected index.
    #[must_use]
    pub fn get(&self) -> usize {
        self.value.get()
    }

    /// Observe selection changes.
    pub fn subscribe(&self, callback: impl Fn(usize) + 'static) -> Subscription {
        self.value.subscribe(move |index| callback(*index))
    }
}
