#![forbid(unsafe_code)]

//! Core math for paged tab strips.
//!
//! # Role in pagertab
//! `pagertab-core` is the pure layer: given measured tab widths, the selected
//! index and a drag offset from a paged container, it computes where the
//! indicator bar sits and where the scrollable row should move. It owns no
//! shared state and never fails; the event wiring lives in
//! `pagertab-runtime`.
//!
//! # Primary responsibilities
//! - **TabWidthRegistry**: measured widths and the "layout settled" signal.
//! - **IndicatorPositioner**: indicator center and width, interpolated
//!   between neighbors during a drag.
//! - **ScrollSynchronizer**: center-or-end scroll decisions and the one-shot
//!   recentering retry.
//! - **PagerStyle**: immutable configuration passed to all of the above.
//!
//! # Example
//!
//! ```
//! use pagertab_core::{DragOffset, IndicatorPositioner, PagerStyle, TabWidthRegistry};
//!
//! let style = PagerStyle::default().tab_item_spacing(8.0);
//! let mut registry = TabWidthRegistry::new(3, style.tab_item_spacing);
//! for (index, width) in [40.0, 60.0, 50.0].into_iter().enumerate() {
//!     registry.set_width(index, width);
//! }
//! let positioner = IndicatorPositioner::new(&style);
//! let geometry = positioner.geometry(&registry, 1, DragOffset::SETTLED);
//! assert_eq!(geometry.center_x, 86.0);
//! assert_eq!(geometry.width, 60.0);
//! ```

pub mod drag;
pub mod geometry;
pub mod positioner;
pub mod registry;
pub mod style;
pub mod synchronizer;

pub use drag::{DragDirection, DragOffset};
pub use geometry::{BarRect, IndicatorGeometry, Insets};
pub use positioner::IndicatorPositioner;
pub use registry::{TabItem, TabWidthRegistry};
pub use style::{PagerStyle, Rgba, StyleConfigError};
pub use synchronizer::{RecenterRetry, ScrollAnchor, ScrollSynchronizer, ScrollTarget};
