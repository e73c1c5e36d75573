#![forbid(unsafe_code)]

//! Geometric primitives for the tab strip.
//!
//! All values are in the strip's content coordinate space: `x = 0` is the
//! leading edge of the first tab, before padding and scrolling are applied.

#[cfg(feature = "style-config")]
use serde::{Deserialize, Serialize};

use crate::style::PagerStyle;

/// Horizontal placement of the indicator bar.
///
/// Fully derived from the registry, selection and drag offset. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorGeometry {
    /// Center of the bar along the strip.
    pub center_x: f64,
    /// Width of the bar.
    pub width: f64,
}

impl IndicatorGeometry {
    /// The zero geometry used for unknown or out-of-range tabs.
    pub const ZERO: Self = Self {
        center_x: 0.0,
        width: 0.0,
    };

    /// Create a geometry from center and width.
    #[must_use]
    pub const fn new(center_x: f64, width: f64) -> Self {
        Self { center_x, width }
    }

    /// Leading edge of the bar.
    #[inline]
    pub fn left(&self) -> f64 {
        self.center_x - self.width / 2.0
    }

    /// Trailing edge of the bar.
    #[inline]
    pub fn right(&self) -> f64 {
        self.center_x + self.width / 2.0
    }

    /// Linear interpolation toward `other` by `t`.
    ///
    /// `t` is not clamped: callers pass the container's drag fraction as-is.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            center_x: self.center_x + (other.center_x - self.center_x) * t,
            width: self.width - (self.width - other.width) * t,
        }
    }

    /// Whether both components are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.center_x.is_finite() && self.width.is_finite()
    }
}

/// Edge insets for padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "style-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "style-config", serde(default))]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    /// Equal insets on every edge.
    #[must_use]
    pub const fn all(val: f64) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Left and right insets only.
    #[must_use]
    pub const fn horizontal(val: f64) -> Self {
        Self {
            top: 0.0,
            right: val,
            bottom: 0.0,
            left: val,
        }
    }

    /// Top and bottom insets only.
    #[must_use]
    pub const fn vertical(val: f64) -> Self {
        Self {
            top: val,
            right: 0.0,
            bottom: val,
            left: 0.0,
        }
    }

    /// Insets with specific values.
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub fn horizontal_sum(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical_sum(&self) -> f64 {
        self.top + self.bottom
    }
}

impl From<f64> for Insets {
    fn from(val: f64) -> Self {
        Self::all(val)
    }
}

impl From<(f64, f64)> for Insets {
    fn from((vertical, horizontal): (f64, f64)) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

impl From<(f64, f64, f64, f64)> for Insets {
    fn from((top, right, bottom, left): (f64, f64, f64, f64)) -> Self {
        Self::new(top, right, bottom, left)
    }
}

/// Drawable rectangle for the indicator bar, in tab-row coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarRect {
    /// Place the bar for `geometry` inside a tab row styled by `style`.
    ///
    /// The bar sits on the bottom edge of the row content, shifted by the
    /// leading padding. When the divider is shown, the bar straddles it by
    /// half its height.
    #[must_use]
    pub fn for_indicator(geometry: IndicatorGeometry, style: &PagerStyle) -> Self {
        let height = style.indicator_bar_height;
        let mut y = style.tab_item_height - style.padding.bottom - height;
        if style.show_bottom_divider {
            y += height / 2.0;
        }
        Self {
            x: style.padding.left + geometry.left(),
            y,
            width: geometry.width.max(0.0),
            height,
        }
    }

    /// Trailing edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}
