//! Text measurement: wrapped line counts from a per-character width model.
//!
//! Without font files, glyph advances are approximated as a fraction of the
//! font size chosen by character class:
//!
//! | class                          | width            |
//! |--------------------------------|------------------|
//! | CJK ideograph                  | `1.0 × size`     |
//! | alphanumeric, ASCII punctuation| `0.6 × size`     |
//! | space                          | `0.3 × size`     |
//! | anything else                  | `1.0 × size`     |
//!
//! The table is configurable for scripts the defaults estimate poorly.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::error::LayoutError;

/// Line-count measurement used by the measure pass for leaf text.
///
/// Implementors must be pure: the same inputs always give the same count.
pub trait TextMeasurer: Send + Sync {
    /// Number of lines `text` wraps to at `font_size_px` within
    /// `available_width_px`.
    ///
    /// Empty text is zero lines; non-empty text is at least one.
    ///
    /// # Errors
    ///
    /// [`LayoutError::InvalidConstraint`] if the width or font size is not
    /// positive and finite.
    fn measure_lines(
        &self,
        text: &str,
        font_size_px: f32,
        available_width_px: f32,
    ) -> Result<usize, LayoutError>;
}

/// A width ratio for an inclusive range of characters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharRangeWidth {
    /// First character of the range.
    pub start: char,
    /// Last character of the range (inclusive).
    pub end: char,
    /// Advance width as a multiple of the font size.
    pub ratio: f32,
}

/// Character-class width ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharWidthTable {
    /// CJK ideographs.
    pub cjk: f32,
    /// Letters, digits, and ASCII punctuation.
    pub narrow: f32,
    /// The space character.
    pub space: f32,
    /// Everything else.
    pub other: f32,
    /// Ranges checked before the classes above, first match wins.
    pub overrides: Vec<CharRangeWidth>,
}

impl Default for CharWidthTable {
    fn default() -> Self {
        Self {
            cjk: 1.0,
            narrow: 0.6,
            space: 0.3,
            other: 1.0,
            overrides: Vec::new(),
        }
    }
}

impl CharWidthTable {
    /// Advance width of `ch` as a multiple of the font size.
    #[must_use]
    pub fn ratio(&self, ch: char) -> f32 {
        if let Some(range) = self
            .overrides
            .iter()
            .find(|range| (range.start..=range.end).contains(&ch))
        {
            return range.ratio;
        }
        if is_cjk_ideograph(ch) {
            self.cjk
        } else if ch == ' ' {
            self.space
        } else if ch.is_alphanumeric() || ch.is_ascii_punctuation() {
            self.narrow
        } else {
            self.other
        }
    }
}

/// CJK Unified Ideographs, Extension A, Compatibility Ideographs, and Extension B.
#[must_use]
pub fn is_cjk_ideograph(ch: char) -> bool {
    matches!(
        ch,
        '\u{4E00}'..='\u{9FFF}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{2A6DF}'
    )
}

/// Greedy line counting over a character-ratio table.
///
/// Characters are accumulated left to right; when the next character would
/// push the line past the available width a new line starts with it. A
/// character wider than the whole line sits on a line of its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatioTextMeasurer {
    table: CharWidthTable,
}

impl RatioTextMeasurer {
    /// Measurer over a custom width table.
    #[must_use]
    pub const fn new(table: CharWidthTable) -> Self {
        Self { table }
    }

    /// Measurer over the configuration's `char_widths` table.
    #[must_use]
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.char_widths.clone())
    }

    /// Unwrapped width of `text` in pixels.
    #[must_use]
    pub fn text_width(&self, text: &str, font_size_px: f32) -> f32 {
        text.chars()
            .map(|ch| self.table.ratio(ch) * font_size_px)
            .sum()
    }
}

impl TextMeasurer for RatioTextMeasurer {
    fn measure_lines(
        &self,
        text: &str,
        font_size_px: f32,
        available_width_px: f32,
    ) -> Result<usize, LayoutError> {
        let width = f64::from(LayoutError::require_positive(
            "available width",
            available_width_px,
        )?);
        let size = f64::from(LayoutError::require_positive("font size", font_size_px)?);

        if text.is_empty() {
            return Ok(0);
        }

        let mut lines = 1;
        let mut line_width = 0.0_f64;
        for ch in text.chars() {
            let advance = f64::from(self.table.ratio(ch)) * size;
            if line_width > 0.0 && line_width + advance > width {
                lines += 1;
                line_width = 0.0;
            }
            line_width += advance;
        }
        Ok(lines)
    }
}

/// Line count with the default width table.
///
/// # Errors
///
/// [`LayoutError::InvalidConstraint`] if `available_width_px` or
/// `font_size_px` is not positive and finite.
pub fn measure_lines(
    text: &str,
    font_size_px: f32,
    available_width_px: f32,
) -> Result<usize, LayoutError> {
    RatioTextMeasurer::default().measure_lines(text, font_size_px, available_width_px)
}

/// `(text, font size bits, width bits)`.
type CacheKey = (String, u32, u32);

/// Memoizing wrapper around another measurer.
///
/// Entries are keyed purely by their inputs, so the cache never needs
/// invalidation and can be shared by concurrent passes. Errors are not
/// cached.
#[derive(Debug, Default)]
pub struct CachedTextMeasurer<M> {
    inner: M,
    cache: RwLock<HashMap<CacheKey, usize>>,
}

impl<M: TextMeasurer> CachedTextMeasurer<M> {
    /// Wrap `inner` with an empty cache.
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.read().map_or(0, |cache| cache.len())
    }

    /// Whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

}

impl<M: TextMeasurer> TextMeasurer for CachedTextMeasurer<M> {
    fn measure_lines(
        &self,
        text: &str,
        font_size_px: f32,
        available_width_px: f32,
    ) -> Result<usize, LayoutError> {
        let key = (
            text.to_string(),
            font_size_px.to_bits(),
            available_width_px.to_bits(),
        );
        let cached = self
            .cache
            .read()
            .ok()
            .and_then(|cache| cache.get(&key).copied());
        if let Some(lines) = cached {
            return Ok(lines);
        }

        let lines = self
            .inner
            .measure_lines(text, font_size_px, available_width_px)?;
        if let Ok(mut cache) = self.cache.write() {
            let _ = cache.insert(key, lines);
        }
        Ok(lines)
    }
}
