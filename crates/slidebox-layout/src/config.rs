//! Engine configuration.
//!
//! One immutable [`LayoutConfig`] is threaded through a whole pass. Defaults
//! describe a 1920×1080 slide with 80px side margins.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::ContentNode;
use crate::text_metrics::CharWidthTable;

/// Failure to load or validate a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON could not be parsed into a configuration.
    #[error("invalid layout config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of range.
    #[error("invalid layout config: {field} must be {expected}, got {value}")]
    OutOfRange {
        /// Dotted path of the field.
        field: &'static str,
        /// Human-readable constraint.
        expected: &'static str,
        /// The rejected value.
        value: f32,
    },
}

/// Fixed-size slide canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas width in pixels.
    pub width: f32,
    /// Canvas height in pixels.
    pub height: f32,
    /// Left inset of the content column.
    pub margin_left: f32,
    /// Right inset of the content column.
    pub margin_right: f32,
    /// Space kept free at the bottom (page numbers, footers).
    pub bottom_reserve: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            margin_left: 80.0,
            margin_right: 80.0,
            bottom_reserve: 60.0,
        }
    }
}

impl CanvasConfig {
    /// Width available to top-level sections.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Border-box width of a top-level section: the content width less the
    /// section's own horizontal margins.
    #[must_use]
    pub fn section_width(&self, section: &ContentNode) -> f32 {
        self.content_width() - section.style.margin.sanitized().horizontal()
    }

    /// Lowest y coordinate content may reach.
    #[must_use]
    pub fn usable_height(&self) -> f32 {
        self.height - self.bottom_reserve
    }
}

/// Layout engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// The slide canvas.
    pub canvas: CanvasConfig,
    /// y coordinate of the first section.
    pub initial_offset: f32,
    /// Vertical gap between consecutive top-level sections.
    pub section_gap: f32,
    /// Font size for nodes whose style leaves it unset.
    pub default_font_size_px: f32,
    /// Line-height multiplier for nodes whose style leaves it unset.
    pub default_line_height: f32,
    /// Character width ratios, read by
    /// [`RatioTextMeasurer::from_config`](crate::text_metrics::RatioTextMeasurer::from_config).
    pub char_widths: CharWidthTable,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            initial_offset: 20.0,
            section_gap: 40.0,
            default_font_size_px: 16.0,
            default_line_height: 1.5,
            char_widths: CharWidthTable::default(),
        }
    }
}

impl LayoutConfig {
    /// Parse a (possibly partial) JSON configuration over the defaults and
    /// validate it.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON, [`ConfigError::OutOfRange`]
    /// for values [`LayoutConfig::validate`] rejects.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every size is usable.
    ///
    /// # Errors
    ///
    /// [`ConfigError::OutOfRange`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("canvas.width", self.canvas.width)?;
        positive("canvas.height", self.canvas.height)?;
        positive("canvas content width", self.canvas.content_width())?;
        non_negative("canvas.margin_left", self.canvas.margin_left)?;
        non_negative("canvas.margin_right", self.canvas.margin_right)?;
        non_negative("canvas.bottom_reserve", self.canvas.bottom_reserve)?;
        non_negative("initial_offset", self.initial_offset)?;
        non_negative("section_gap", self.section_gap)?;
        positive("default_font_size_px", self.default_font_size_px)?;
        positive("default_line_height", self.default_line_height)?;
        let table = &self.char_widths;
        for (field, ratio) in [
            ("char_widths.cjk", table.cjk),
            ("char_widths.narrow", table.narrow),
            ("char_widths.space", table.space),
            ("char_widths.other", table.other),
        ] {
            non_negative(field, ratio)?;
        }
        for range in &table.overrides {
            non_negative("char_widths.overrides.ratio", range.ratio)?;
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected: "positive",
            value,
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected: "zero or positive",
            value,
        })
    }
}
