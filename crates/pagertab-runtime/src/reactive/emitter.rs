#![forbid(unsafe_code)]

//! Stateless event stream.
//!
//! [`Emitter<T>`] is the event-shaped sibling of
//! [`Observable`](super::observable::Observable): every `emit` reaches every
//! live subscriber, even when the payload equals the previous one. Scroll
//! requests use it because asking twice to center the same tab is meaningful.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::observable::Subscription;

type HandlerRc<T> = Rc<dyn Fn(&T)>;
type HandlerWeak<T> = Weak<dyn Fn(&T)>;

/// Shared list of event handlers.
pub struct Emitter<T> {
    handlers: Rc<RefCell<Vec<HandlerWeak<T>>>>,
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            handlers: Rc::clone(&self.handlers),
        }
    }
}

impl<T> Default for Emitter<T> {
    fn default() -> Self {
        Self {
            handlers: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T> std::fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("handler_count", &self.handlers.borrow().len())
            .finish()
    }
}

impl<T: 'static> Emitter<T> {
    /// Create an emitter with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Dropping the [`Subscription`] removes it.
    pub fn subscribe(&self, handler: impl Fn(&T) + 'static) -> Subscription {
        let strong: HandlerRc<T> = Rc::new(handler);
        self.handlers.borrow_mut().push(Rc::downgrade(&strong));
        Subscription::from_guard(strong)
    }

    /// Deliver `event` to every live handler in registration order.
    /// Returns the number of handlers reached.
    pub fn emit(&self, event: &T) -> usize {
        let live: Vec<HandlerRc<T>> = {
            let mut handlers = self.handlers.borrow_mut();
            handlers.retain(|w| w.strong_count() > 0);
            handlers.iter().filter_map(Weak::upgrade).collect()
        };
        for handler in &live {
            handler(event);
        }
        live.len()
    }

    /// Registered handlers, including dead ones not yet pruned.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn repeated_events_are_all_delivered() {
        let emitter = Emitter::new();
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let _sub = emitter.subscribe(move |_: &u8| count_clone.set(count_clone.get() + 1));

        assert_eq!(emitter.emit(&1), 1);
        assert_eq!(emitter.emit(&1), 1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn dropped_handler_is_skipped_and_pruned() {
        let emitter = Emitter::new();
        let sub = emitter.subscribe(|_: &u8| {});
        drop(sub);
        assert_eq!(emitter.handler_count(), 1);
        assert_eq!(emitter.emit(&0), 0);
        assert_eq!(emitter.handler_count(), 0);
    }

    #[test]
    fn clones_share_handlers() {
        let emitter = Emitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let _sub = emitter.subscribe(move |v: &u8| seen_clone.borrow_mut().push(*v));
        emitter.clone().emit(&9);
        assert_eq!(*seen.borrow(), vec![9]);
    }
}
