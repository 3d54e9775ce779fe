//! Resolved style values consumed by the layout engine.
//!
//! The cascade (selectors, inheritance, unit resolution) happens before a
//! [`StyleSpec`] reaches the engine. Every length here is already in pixels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::box_model::EdgeSizes;

/// How a container composes its children.
///
/// Serialized as a keyword: `"stack"`, `"row"`, or `"grid(N)"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DisplayMode {
    /// Children flow top to bottom.
    #[default]
    Stack,
    /// Children share one line, left to right, in equal-width slots.
    Row,
    /// Children fill a fixed number of equal-width columns, wrapping into rows.
    Grid {
        /// Number of columns. Zero is not a usable grid.
        columns: usize,
    },
    /// A keyword the engine does not recognize. Laid out as [`DisplayMode::Stack`].
    Unknown(String),
}

impl DisplayMode {
    /// Shorthand for `Grid { columns }`.
    #[must_use]
    pub const fn grid(columns: usize) -> Self {
        Self::Grid { columns }
    }

    /// Parse a display keyword.
    ///
    /// Accepts `stack`, `row`, `grid(N)`, and `grid-N` (case-insensitive).
    /// `block` and `flex-col` are synonyms for `stack`, `flex` for `row`.
    /// Anything else becomes [`DisplayMode::Unknown`] so the pass can warn and
    /// continue.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        let lower = keyword.trim().to_ascii_lowercase();
        match lower.as_str() {
            "stack" | "block" | "flex-col" => Self::Stack,
            "row" | "flex" => Self::Row,
            _ => parse_grid_columns(&lower)
                .map_or_else(|| Self::Unknown(keyword.trim().to_string()), Self::grid),
        }
    }
}

/// `grid(3)` or `grid-3` → `Some(3)`.
fn parse_grid_columns(keyword: &str) -> Option<usize> {
    let rest = keyword.strip_prefix("grid")?;
    let digits = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .or_else(|| rest.strip_prefix('-'))?;
    digits.trim().parse().ok()
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stack => f.write_str("stack"),
            Self::Row => f.write_str("row"),
            Self::Grid { columns } => write!(f, "grid({columns})"),
            Self::Unknown(keyword) => f.write_str(keyword),
        }
    }
}

impl FromStr for DisplayMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_keyword(s))
    }
}

impl From<String> for DisplayMode {
    fn from(keyword: String) -> Self {
        Self::from_keyword(&keyword)
    }
}

impl From<DisplayMode> for String {
    fn from(mode: DisplayMode) -> Self {
        mode.to_string()
    }
}

/// Horizontal alignment of text runs inside a box. Passed through to the renderer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
    /// Stretched to both edges.
    Justify,
}

/// A solid fill painted over the box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    /// Color in any notation the renderer understands (`#0a4275`, `rgb(...)`).
    pub color: String,
}

/// A stroke painted along the inside of the box edge.
///
/// Borders do not change geometry: the stroke sits over the padding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    /// Stroke width in pixels.
    pub width: f32,
    /// Stroke color.
    pub color: String,
}

/// Fully resolved style of one content node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSpec {
    /// Space between the box edge and its content.
    pub padding: EdgeSizes,
    /// Space around the box inside its parent's slot.
    pub margin: EdgeSizes,
    /// Spacing between adjacent children (and between grid rows).
    pub gap: f32,
    /// Lower bound on the box height.
    pub min_height: Option<f32>,
    /// Upper bound on the box height. Taller content is clamped and flagged.
    pub max_height: Option<f32>,
    /// Composition of the children.
    pub display: DisplayMode,
    /// Font size for leaf text. `None` uses the configured default.
    pub font_size_px: Option<f32>,
    /// Line height as a multiple of the font size. `None` uses the configured default.
    pub line_height_multiplier: Option<f32>,
    /// Text alignment, for the renderer.
    pub text_align: TextAlign,
    /// Optional background fill.
    pub background: Option<Background>,
    /// Optional border stroke.
    pub border: Option<Border>,
}

impl StyleSpec {
    /// Default style with the given composition.
    #[must_use]
    pub fn with_display(display: DisplayMode) -> Self {
        Self {
            display,
            ..Self::default()
        }
    }

    /// A vertical stack.
    #[must_use]
    pub fn stack() -> Self {
        Self::with_display(DisplayMode::Stack)
    }

    /// A single row.
    #[must_use]
    pub fn row() -> Self {
        Self::with_display(DisplayMode::Row)
    }

    /// A grid with `columns` columns.
    #[must_use]
    pub fn grid(columns: usize) -> Self {
        Self::with_display(DisplayMode::grid(columns))
    }

    /// Set the padding.
    #[must_use]
    pub fn padding(mut self, padding: EdgeSizes) -> Self {
        self.padding = padding;
        self
    }

    /// Set the margin.
    #[must_use]
    pub fn margin(mut self, margin: EdgeSizes) -> Self {
        self.margin = margin;
        self
    }

    /// Set the inter-child gap.
    #[must_use]
    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Set the minimum height.
    #[must_use]
    pub fn min_height(mut self, min_height: f32) -> Self {
        self.min_height = Some(min_height);
        self
    }

    /// Set the maximum height.
    #[must_use]
    pub fn max_height(mut self, max_height: f32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// Set the font size.
    #[must_use]
    pub fn font_size(mut self, font_size_px: f32) -> Self {
        self.font_size_px = Some(font_size_px);
        self
    }

    /// Set the line-height multiplier.
    #[must_use]
    pub fn line_height(mut self, multiplier: f32) -> Self {
        self.line_height_multiplier = Some(multiplier);
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(Background {
            color: color.into(),
        });
        self
    }
}
