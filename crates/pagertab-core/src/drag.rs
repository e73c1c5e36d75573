#![forbid(unsafe_code)]

//! Drag progress reported by the paged container.

/// Swipe progress in page-width units.
///
/// `0` means settled on the selected page. Negative values drag toward the
/// next tab (`selected + 1`), positive values toward the previous tab
/// (`selected - 1`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct DragOffset(pub f64);

/// Which neighbor a drag is revealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDirection {
    /// No drag in progress.
    Settled,
    /// Toward `selected - 1`.
    Previous,
    /// Toward `selected + 1`.
    Next,
}

impl DragOffset {
    /// Settled on the selected page.
    pub const SETTLED: Self = Self(0.0);

    /// Derive the drag offset from a container's absolute content offset.
    ///
    /// The container scrolls to `-viewport_width * page` when settled on
    /// `page`, so the fractional drag relative to `selected` is
    /// `content_offset / viewport_width + selected`. A viewport that is not
    /// finite and positive yields [`DragOffset::SETTLED`].
    #[must_use]
    pub fn from_content_offset(content_offset: f64, viewport_width: f64, selected: usize) -> Self {
        if !(viewport_width.is_finite() && viewport_width > 0.0) || !content_offset.is_finite() {
            return Self::SETTLED;
        }
        Self(content_offset / viewport_width + selected as f64)
    }

    /// Raw value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Interpolation fraction `|offset|`.
    #[inline]
    #[must_use]
    pub fn fraction(self) -> f64 {
        self.0.abs()
    }

    /// Direction of the drag.
    #[must_use]
    pub fn direction(self) -> DragDirection {
        if self.0 > 0.0 {
            DragDirection::Previous
        } else if self.0 < 0.0 {
            DragDirection::Next
        } else {
            // Covers 0.0, -0.0 and NaN.
            DragDirection::Settled
        }
    }

    /// Whether the container is settled on the selected page.
    #[inline]
    #[must_use]
    pub fn is_settled(self) -> bool {
        self.direction() == DragDirection::Settled
    }
}

impl From<f64> for DragOffset {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_follows_sign() {
        assert_eq!(DragOffset(0.3).direction(), DragDirection::Previous);
        assert_eq!(DragOffset(-0.3).direction(), DragDirection::Next);
        assert_eq!(DragOffset(0.0).direction(), DragDirection::Settled);
        assert_eq!(DragOffset(-0.0).direction(), DragDirection::Settled);
        assert_eq!(DragOffset(f64::NAN).direction(), DragDirection::Settled);
    }

    #[test]
    fn settled_content_offset_is_zero_drag() {
        let drag = DragOffset::from_content_offset(-640.0, 320.0, 2);
        assert_eq!(drag, DragOffset(0.0));
        assert!(drag.is_settled());
    }

    #[test]
    fn swiping_toward_next_page_is_negative() {
        // Page 1 of width 320, dragged a quarter page further right.
        let drag = DragOffset::from_content_offset(-400.0, 320.0, 1);
        assert_eq!(drag, DragOffset(-0.25));
        assert_eq!(drag.fraction(), 0.25);
    }

    #[test]
    fn swiping_toward_previous_page_is_positive() {
        let drag = DragOffset::from_content_offset(-160.0, 320.0, 1);
        assert_eq!(drag, DragOffset(0.5));
    }

    #[test]
    fn degenerate_viewport_is_settled() {
        assert!(DragOffset::from_content_offset(-10.0, 0.0, 1).is_settled());
        assert!(DragOffset::from_content_offset(-10.0, -5.0, 1).is_settled());
        assert!(DragOffset::from_content_offset(-10.0, f64::NAN, 1).is_settled());
        assert!(DragOffset::from_content_offset(f64::INFINITY, 320.0, 1).is_settled());
    }
}
