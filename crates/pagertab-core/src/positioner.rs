#![forbid(unsafe_code)]

//! Indicator placement.
//!
//! Maps `(selected, drag offset, registry)` to an [`IndicatorGeometry`].
//!
//! # Algorithm
//!
//! The base geometry of tab `i` is centered at
//! `cumulative_width_before(i) + spacing * i + width(i) / 2` with width
//! `width(i)`. While settled, the indicator sits exactly on the selected
//! tab's base geometry. During a drag it is interpolated linearly toward the
//! neighbor being revealed, using `t = |drag|` as the fraction:
//!
//! ```text
//! center_x = selected.center_x + (neighbor.center_x - selected.center_x) * t
//! width    = selected.width    - (selected.width    - neighbor.width)    * t
//! ```
//!
//! # Invariants
//!
//! 1. A settled drag yields the selected base geometry bit-for-bit.
//! 2. Dragging past the first or last tab clamps to the selected geometry.
//! 3. `t` is not clamped; the container is trusted to stay within a page.
//! 4. Unknown widths read as 0; the output is always produced.

use crate::drag::{DragDirection, DragOffset};
use crate::geometry::IndicatorGeometry;
use crate::registry::TabWidthRegistry;
use crate::style::PagerStyle;

/// Computes indicator geometry for a tab strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPositioner {
    spacing: f64,
}

impl IndicatorPositioner {
    /// Create a positioner from the strip style.
    #[must_use]
    pub fn new(style: &PagerStyle) -> Self {
        Self {
            spacing: style.tab_item_spacing,
        }
    }

    /// Create a positioner with an explicit gap between tabs.
    #[must_use]
    pub const fn with_spacing(spacing: f64) -> Self {
        Self { spacing }
    }

    /// Gap between tabs.
    #[must_use]
    pub const fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Base geometry of tab `index`, or [`IndicatorGeometry::ZERO`] when out
    /// of range.
    #[must_use]
    pub fn base_geometry(&self, registry: &TabWidthRegistry, index: usize) -> IndicatorGeometry {
        if index >= registry.items_count() {
            return IndicatorGeometry::ZERO;
        }
        let width = registry.width_or_zero(index);
        let center_x =
            registry.cumulative_width_before(index) + self.spacing * index as f64 + width / 2.0;
        IndicatorGeometry { center_x, width }
    }

    /// Neighbor being revealed by `drag`, or `None` when settled or when the
    /// drag runs past either end of the strip.
    #[must_use]
    pub fn neighbor(selected: usize, drag: DragOffset, items_count: usize) -> Option<usize> {
        match drag.direction() {
            DragDirection::Settled => None,
            DragDirection::Previous => selected.checked_sub(1),
            DragDirection::Next => selected
                .checked_add(1)
                .filter(|&next| next < items_count),
        }
    }

    /// Indicator geometry for `selected` under `drag`.
    #[must_use]
    pub fn geometry(
        &self,
        registry: &TabWidthRegistry,
        selected: usize,
        drag: DragOffset,
    ) -> IndicatorGeometry {
        let current = self.base_geometry(registry, selected);
        // `-0.0` and NaN are settled too, so `t` is never zero past this point.
        if drag.is_settled() {
            return current;
        }

        let t = drag.fraction();
        let target = match Self::neighbor(selected, drag, registry.items_count()) {
            Some(neighbor) => self.base_geometry(registry, neighbor),
            None => current,
        };
        current.lerp(target, t)
    }
}
