#![forbid(unsafe_code)]

//! Observable value cell with change notification and version tracking.
//!
//! # Design
//!
//! [`Observable<T>`] keeps its value in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). When the value changes (by `PartialEq`), every live
//! subscriber is called synchronously, in registration order, on the calling
//! thread. There is no scheduler: the UI thread that mutates is the thread
//! that notifies.
//!
//! | Operation     | Complexity                 |
//! |---------------|----------------------------|
//! | `get()`       | O(1)                       |
//! | `set()`       | O(S) where S = subscribers |
//! | `subscribe()` | O(1) amortized             |
//!
//! # Failure Modes
//!
//! - **Re-entrant set**: the borrow is released before callbacks run, so a
//!   subscriber may call `set()` on the same observable. The nested
//!   notification completes before the outer loop continues.
//! - **Subscriber leak**: callbacks stay registered while their
//!   [`Subscription`] guard lives. Dead entries are pruned lazily on notify.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace_span;
use web_time::Instant;

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct ObservableInner<T> {
    value: T,
    version: u64,
    /// Pruned on notify.
    subscribers: Vec<CallbackWeak<T>>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` creates a new handle to the **same** value and
/// subscriber list.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each value-changing mutation.
/// 2. `set(v)` where `v == current` is a no-op.
/// 3. Subscribers are notified in registration order.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create an observable at version 0 with no subscribers.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value. Notifies subscribers when it differs from the
    /// current one. Returns `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
        true
    }

    /// Modify the value in place. Notifies subscribers when the result
    /// differs from the previous value. Returns `true` if the value changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let old = inner.value.clone();
            f(&mut inner.value);
            if inner.value != old {
                inner.version += 1;
                true
            } else {
                false
            }
        };
        if changed {
            self.notify();
        }
        changed
    }

    /// Subscribe to changes. The callback receives the new value.
    ///
    /// Dropping the returned [`Subscription`] unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        let weak = Rc::downgrade(&strong);
        self.inner.borrow_mut().subscribers.push(weak);
        Subscription::from_guard(strong)
    }

    /// Current version. Useful for dirty-checking in render loops.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self) {
        // Collect live callbacks first so no borrow is held during calls.
        let (callbacks, value): (Vec<CallbackRc<T>>, T) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            let callbacks = inner
                .subscribers
                .iter()
                .filter_map(|w| w.upgrade())
                .collect();
            (callbacks, inner.value.clone())
        };

        if callbacks.is_empty() {
            return;
        }

        let start = Instant::now();
        let span = trace_span!(
            "pagertab.notify",
            subscribers = callbacks.len() as u64,
            duration_us = tracing::field::Empty
        );
        let _guard = span.enter();

        for cb in &callbacks {
            cb(&value);
        }

        span.record("duration_us", start.elapsed().as_micros() as u64);
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping it releases the only strong reference to the callback, so the
/// weak entry in the subscriber list stops upgrading.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl Subscription {
    pub(crate) fn from_guard(guard: impl std::any::Any) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }

    /// Bundle several guards so they drop together.
    #[must_use]
    pub fn group(subscriptions: Vec<Subscription>) -> Self {
        Self::from_guard(subscriptions)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn get_set_basic() {
        let obs = Observable::new(42);
        assert_eq!(obs.get(), 42);
        assert_eq!(obs.version(), 0);

        assert!(obs.set(99));
        assert_eq!(obs.get(), 99);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn no_change_no_version_bump() {
        let obs = Observable::new(42);
        assert!(!obs.set(42));
        assert_eq!(obs.version(), 0);
    }

    #[test]
    fn update_mutates_in_place() {
        let obs = Observable::new(vec![1, 2, 3]);
        assert!(obs.update(|v| v.push(4)));
        assert_eq!(obs.get(), vec![1, 2, 3, 4]);
        assert_eq!(obs.version(), 1);
        assert!(!obs.update(|_| {}));
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn with_borrows_value() {
        let obs = Observable::new(vec![1.5, 2.5]);
        assert_eq!(obs.with(|v| v.iter().sum::<f64>()), 4.0);
    }

    #[test]
    fn subscriber_receives_new_value() {
        let obs = Observable::new(0usize);
        let last_seen = Rc::new(Cell::new(0));
        let last_clone = Rc::clone(&last_seen);
        let _sub = obs.subscribe(move |val| last_clone.set(*val));

        obs.set(3);
        assert_eq!(last_seen.get(), 3);
        obs.set(1);
        assert_eq!(last_seen.get(), 1);
    }

    #[test]
    fn subscription_drop_unsubscribes() {
        let obs = Observable::new(0);
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let sub = obs.subscribe(move |_| count_clone.set(count_clone.get() + 1));

        obs.set(1);
        drop(sub);
        obs.set(2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn grouped_subscriptions_drop_together() {
        let obs = Observable::new(0);
        let count = Rc::new(Cell::new(0u32));
        let a = Rc::clone(&count);
        let b = Rc::clone(&count);
        let group = Subscription::group(vec![
            obs.subscribe(move |_| a.set(a.get() + 1)),
            obs.subscribe(move |_| b.set(b.get() + 1)),
        ]);

        obs.set(1);
        assert_eq!(count.get(), 2);
        drop(group);
        obs.set(2);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn notification_order_is_registration_order() {
        let obs = Observable::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        let log1 = Rc::clone(&log);
        let _s1 = obs.subscribe(move |_| log1.borrow_mut().push("positioner"));
        let log2 = Rc::clone(&log);
        let _s2 = obs.subscribe(move |_| log2.borrow_mut().push("synchronizer"));

        obs.set(1);
        assert_eq!(*log.borrow(), vec!["positioner", "synchronizer"]);
    }

    #[test]
    fn clone_shares_state_and_subscribers() {
        let obs1 = Observable::new(0);
        let obs2 = obs1.clone();
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let _sub = obs1.subscribe(move |_| count_clone.set(count_clone.get() + 1));

        obs2.set(7);
        assert_eq!(obs1.get(), 7);
        assert_eq!(obs1.version(), 1);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn dead_subscribers_pruned_on_notify() {
        let obs = Observable::new(0);
        let _s1 = obs.subscribe(|_| {});
        let s2 = obs.subscribe(|_| {});
        drop(s2);
        assert_eq!(obs.subscriber_count(), 2);
        obs.set(1);
        assert_eq!(obs.subscriber_count(), 1);
    }

    #[test]
    fn reentrant_set_from_subscriber() {
        let obs = Observable::new(0);
        let inner = obs.clone();
        let _sub = obs.subscribe(move |v| {
            if *v == 1 {
                inner.set(2);
            }
        });
        obs.set(1);
        assert_eq!(obs.get(), 2);
        assert_eq!(obs.version(), 2);
    }

    #[test]
    fn debug_format() {
        let dbg = format!("{:?}", Observable::new(42));
        assert!(dbg.contains("Observable"));
        assert!(dbg.contains("42"));
        assert!(dbg.contains("version"));
    }
}
