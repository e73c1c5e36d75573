#![forbid(unsafe_code)]

//! Single-threaded event runtime for pagertab.
//!
//! # Role in pagertab
//! `pagertab-core` computes geometry; this crate decides *when*. It holds the
//! shared selection, turns UI events into registry updates and selection
//! writes, and publishes indicator geometry and scroll requests to the host.
//!
//! # Modules
//! - [`reactive`]: `Observable` value cells and `Emitter` event streams.
//! - [`selection`]: the single-writer selection shared with the pager.
//! - [`nav_bar`]: [`ScrollableNavBar`], the per-strip event dispatcher.
//!
//! # Example
//!
//! ```
//! use pagertab_core::{PagerStyle, ScrollTarget};
//! use pagertab_runtime::ScrollableNavBar;
//!
//! let bar = ScrollableNavBar::new(3, PagerStyle::default().tab_item_spacing(8.0));
//! bar.on_viewport_width(320.0);
//! for (index, width) in [40.0, 60.0, 50.0].into_iter().enumerate() {
//!     bar.on_width_measured(index, width);
//! }
//! bar.tap(1);
//! assert_eq!(bar.indicator().center_x, 86.0);
//! assert_eq!(bar.take_scroll_requests(), vec![ScrollTarget::end(2)]);
//! ```

pub mod nav_bar;
pub mod reactive;
pub mod selection;

pub use nav_bar::ScrollableNavBar;
pub use reactive::{Emitter, Observable, Subscription};
pub use selection::{SelectionCell, SelectionHandle, SelectionSource};
