#![forbid(unsafe_code)]

//! Reactive primitives for single-threaded UI state.
//!
//! - [`Observable`]: a value cell that notifies on change.
//! - [`Emitter`]: an event stream that notifies on every emit.
//!
//! Both deliver synchronously, in registration order, and hand out
//! [`Subscription`] guards that unsubscribe on drop.

pub mod emitter;
pub mod observable;

pub use emitter::Emitter;
pub use observable::{Observable, Subscription};
