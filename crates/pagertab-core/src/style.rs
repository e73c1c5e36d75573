#![forbid(unsafe_code)]

//! Immutable style configuration for the tab strip.
//!
//! A [`PagerStyle`] is built once and handed to the
//! [`IndicatorPositioner`](crate::positioner::IndicatorPositioner),
//! [`ScrollSynchronizer`](crate::synchronizer::ScrollSynchronizer) and
//! [`TabWidthRegistry`](crate::registry::TabWidthRegistry) constructors. Nothing
//! in the crate reads style from ambient state.
//!
//! # Loading
//!
//! With the `style-config` feature the style can be loaded from TOML or JSON:
//!
//! ```toml
//! tab_item_spacing = 8.0
//! indicator_bar_height = 3.0
//! indicator_bar_color = { r = 0, g = 122, b = 255, a = 255 }
//! show_bottom_divider = false
//! padding = { top = 0.0, right = 12.0, bottom = 0.0, left = 12.0 }
//! recenter_delay_ms = 100
//! ```
//!
//! ```rust,ignore
//! let style = PagerStyle::from_toml_file("pager-style.toml")?;
//! ```
//!
//! Every missing key keeps its [`Default`] value. `recenter_delay_ms = 0`
//! disables the retry; that is also how a disabled retry is written back.

#[cfg(feature = "style-config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "style-config")]
use serde::{Deserialize, Serialize};

use crate::geometry::Insets;

/// Default delay before the one-shot recentering retry.
pub const DEFAULT_RECENTER_DELAY_MS: u64 = 100;

/// An RGBA color for the indicator bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "style-config", derive(Serialize, Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pack into `0xRRGGBBAA`.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32
    }
}

impl Default for Rgba {
    fn default() -> Self {
        // System blue.
        Self::rgb(0, 122, 255)
    }
}

/// Style configuration for a scrollable tab strip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "style-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "style-config", serde(default))]
pub struct PagerStyle {
    /// Horizontal gap between adjacent tab items.
    pub tab_item_spacing: f64,
    /// Thickness of the indicator bar.
    pub indicator_bar_height: f64,
    /// Fill color of the indicator bar.
    pub indicator_bar_color: Rgba,
    /// Height of the whole tab row.
    pub tab_item_height: f64,
    /// Draw a divider under the tab row.
    pub show_bottom_divider: bool,
    /// Edge insets around the scrollable row.
    pub padding: Insets,
    /// Delay of the one-shot recentering retry after first appearance, in
    /// milliseconds. `None` or `Some(0)` disables the retry.
    #[cfg_attr(feature = "style-config", serde(with = "delay_ms"))]
    pub recenter_delay_ms: Option<u64>,
}

impl Default for PagerStyle {
    fn default() -> Self {
        Self {
            tab_item_spacing: 0.0,
            indicator_bar_height: 2.0,
            indicator_bar_color: Rgba::default(),
            tab_item_height: 50.0,
            show_bottom_divider: true,
            padding: Insets::default(),
            recenter_delay_ms: Some(DEFAULT_RECENTER_DELAY_MS),
        }
    }
}

impl PagerStyle {
    /// Set the gap between tab items.
    #[must_use]
    pub fn tab_item_spacing(mut self, spacing: f64) -> Self {
        self.tab_item_spacing = spacing;
        self
    }

    /// Set indicator bar thickness.
    #[must_use]
    pub fn indicator_bar_height(mut self, height: f64) -> Self {
        self.indicator_bar_height = height;
        self
    }

    /// Set indicator bar color.
    #[must_use]
    pub fn indicator_bar_color(mut self, color: Rgba) -> Self {
        self.indicator_bar_color = color;
        self
    }

    /// Set tab row height.
    #[must_use]
    pub fn tab_item_height(mut self, height: f64) -> Self {
        self.tab_item_height = height;
        self
    }

    /// Show or hide the bottom divider.
    #[must_use]
    pub fn show_bottom_divider(mut self, show: bool) -> Self {
        self.show_bottom_divider = show;
        self
    }

    /// Set edge insets.
    #[must_use]
    pub fn padding(mut self, padding: impl Into<Insets>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Set (or disable with `None`) the recentering retry delay.
    ///
    /// The delay has millisecond granularity. A non-zero delay shorter than
    /// 1 ms rounds up to 1 ms; `Duration::ZERO` disables the retry.
    #[must_use]
    pub fn recenter_delay(mut self, delay: Option<Duration>) -> Self {
        self.recenter_delay_ms = delay
            .map(|d| u64::try_from(d.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX))
            .filter(|&ms| ms > 0);
        self
    }

    /// Recentering retry delay, if enabled.
    #[must_use]
    pub fn recenter_delay_duration(&self) -> Option<Duration> {
        self.recenter_delay_ms
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }

    /// Validate all values are usable for layout math.
    ///
    /// Returns a list of problems. An empty list means the style is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.tab_item_spacing.is_finite() || self.tab_item_spacing < 0.0 {
            errors.push(format!(
                "tab_item_spacing must be finite and >= 0, got {}",
                self.tab_item_spacing
            ));
        }
        if !self.indicator_bar_height.is_finite() || self.indicator_bar_height < 0.0 {
            errors.push(format!(
                "indicator_bar_height must be finite and >= 0, got {}",
                self.indicator_bar_height
            ));
        }
        if !self.tab_item_height.is_finite() || self.tab_item_height <= 0.0 {
            errors.push(format!(
                "tab_item_height must be finite and > 0, got {}",
                self.tab_item_height
            ));
        }
        for (name, value) in [
            ("padding.top", self.padding.top),
            ("padding.right", self.padding.right),
            ("padding.bottom", self.padding.bottom),
            ("padding.left", self.padding.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be finite and >= 0, got {value}"));
            }
        }

        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "style-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, StyleConfigError> {
        let style: Self = toml::from_str(s).map_err(StyleConfigError::Toml)?;
        style.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "style-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, StyleConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(StyleConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "style-config")]
    pub fn from_json_str(s: &str) -> Result<Self, StyleConfigError> {
        let style: Self = serde_json::from_str(s).map_err(StyleConfigError::Json)?;
        style.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "style-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StyleConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(StyleConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "style-config")]
    pub fn to_toml_string(&self) -> Result<String, StyleConfigError> {
        toml::to_string_pretty(self).map_err(StyleConfigError::TomlSer)
    }

    #[cfg(feature = "style-config")]
    fn validated(self) -> Result<Self, StyleConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(StyleConfigError::Validation(errors))
        }
    }
}

/// `recenter_delay_ms` on disk: a plain integer, `0` meaning disabled.
#[cfg(feature = "style-config")]
mod delay_ms {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &Option<u64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.unwrap_or(0))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.filter(|&ms| ms > 0))
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a style configuration.
#[derive(Debug)]
pub enum StyleConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "style-config")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "style-config")]
    TomlSer(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "style-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for StyleConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "style-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "style-config")]
            Self::TomlSer(e) => write!(f, "TOML serialize error: {e}"),
            #[cfg(feature = "style-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for StyleConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "style-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "style-config")]
            Self::TomlSer(e) => Some(e),
            #[cfg(feature = "style-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
