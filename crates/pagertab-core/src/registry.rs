#![forbid(unsafe_code)]

//! Measured widths of every tab item.
//!
//! Widths arrive from the item renderer in any order, once per layout pass.
//! The registry keeps a running count of measured items so that
//! [`TabWidthRegistry::all_measured`] is exact after every single update.
//!
//! # Invariants
//!
//! 1. `items_count` is fixed for the lifetime of the registry.
//! 2. A stored width is always finite and `> 0`.
//! 3. `all_measured() == (items_count > 0 && measured_count == items_count)`.
//! 4. `cumulative_width_before(0) == 0`.

/// One tab slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabItem {
    /// Dense, stable position in the strip.
    pub index: usize,
    /// Measured on-screen width; `None` until the first measurement.
    pub width: Option<f64>,
}

impl TabItem {
    /// Measured width, or 0 while unmeasured.
    #[inline]
    #[must_use]
    pub fn width_or_zero(&self) -> f64 {
        self.width.unwrap_or(0.0)
    }
}

/// Registry of tab item widths.
#[derive(Debug, Clone, PartialEq)]
pub struct TabWidthRegistry {
    items: Vec<TabItem>,
    spacing: f64,
    measured: usize,
}

impl TabWidthRegistry {
    /// Create a registry for `items_count` tabs separated by `spacing`.
    #[must_use]
    pub fn new(items_count: usize, spacing: f64) -> Self {
        Self {
            items: (0..items_count)
                .map(|index| TabItem { index, width: None })
                .collect(),
            spacing,
            measured: 0,
        }
    }

    /// Number of tab items.
    #[inline]
    #[must_use]
    pub fn items_count(&self) -> usize {
        self.items.len()
    }

    /// Gap between adjacent items.
    #[inline]
    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Number of items with a measured width.
    #[inline]
    #[must_use]
    pub fn measured_count(&self) -> usize {
        self.measured
    }

    /// Whether every item has been measured at least once.
    #[inline]
    #[must_use]
    pub fn all_measured(&self) -> bool {
        !self.items.is_empty() && self.measured == self.items.len()
    }

    /// All items in index order.
    pub fn items(&self) -> impl ExactSizeIterator<Item = &TabItem> {
        self.items.iter()
    }

    /// Record a measured width.
    ///
    /// Out-of-range indices and widths that are not finite and positive are
    /// ignored; the surrounding tab may not exist yet during startup. Returns
    /// `true` when the stored width changed.
    pub fn set_width(&mut self, index: usize, width: f64) -> bool {
        if !(width.is_finite() && width > 0.0) {
            #[cfg(feature = "tracing")]
            tracing::trace!(message = "pagertab.width.ignored", index, width);
            return false;
        }
        let Some(item) = self.items.get_mut(index) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                message = "pagertab.width.out_of_range",
                index,
                items_count = self.items.len()
            );
            return false;
        };
        if item.width == Some(width) {
            return false;
        }
        let first_measurement = item.width.is_none();
        item.width = Some(width);
        if first_measurement {
            self.measured += 1;
            #[cfg(feature = "tracing")]
            if self.all_measured() {
                tracing::debug!(
                    message = "pagertab.registry.all_measured",
                    items_count = self.items.len()
                );
            }
        }
        true
    }

    /// Measured width of `index`, if any.
    #[must_use]
    pub fn width(&self, index: usize) -> Option<f64> {
        self.items.get(index).and_then(|item| item.width)
    }

    /// Measured width of `index`, or 0 when unmeasured or out of range.
    #[must_use]
    pub fn width_or_zero(&self, index: usize) -> f64 {
        self.width(index).unwrap_or(0.0)
    }

    /// Sum of `width + spacing` over every item before `index`.
    ///
    /// Unmeasured items count as zero width, so the result is approximate
    /// until [`all_measured`](Self::all_measured) holds. `index` past the end
    /// is clamped to `items_count`.
    #[must_use]
    pub fn cumulative_width_before(&self, index: usize) -> f64 {
        let end = index.min(self.items.len());
        self.items[..end]
            .iter()
            .map(|item| item.width_or_zero() + self.spacing)
            .sum()
    }

    /// Sum of widths of every item after `index` (spacing excluded).
    #[must_use]
    pub fn width_after(&self, index: usize) -> f64 {
        self.items
            .iter()
            .skip(index.saturating_add(1))
            .map(TabItem::width_or_zero)
            .sum()
    }

    /// Sum of all measured widths plus the gaps between items.
    #[must_use]
    pub fn content_width(&self) -> f64 {
        let widths: f64 = self.items.iter().map(TabItem::width_or_zero).sum();
        widths + self.spacing * self.items.len().saturating_sub(1) as f64
    }
}
