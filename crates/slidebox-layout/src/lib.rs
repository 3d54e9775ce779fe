//! Box-model layout engine for fixed-size slide canvases.
//!
//! Turns a tree of styled content blocks into absolutely positioned boxes,
//! in two pure passes over the tree.
//!
//! # Scope
//!
//! This crate implements:
//! - **Text metrics** - wrapped line counts from a per-character width model
//!   - CJK, narrow, space and fallback ratios, with per-range overrides
//!   - An optional thread-safe memoizing wrapper
//!
//! - **Measure** - bottom-up heights
//!   - Stack, row and fixed-column grid composition
//!   - Padding, margins and inter-child gaps
//!   - `min_height` / `max_height` clamping with overflow reporting
//!
//! - **Arrange** - top-down positions, emitting one box per visible node
//!
//! - **Sequencing** - top-level sections stacked down the canvas, with a
//!   check against the usable canvas height
//!
//! - **Remediation** - shrink-to-fit font sizing for overflowing text
//!
//! # Not Implemented
//!
//! - Inline/rich text runs and per-glyph positioning
//! - Horizontal overflow and scroll semantics
//! - Page breaking across slides

/// Arrange pass producing positioned boxes.
pub mod arrange;
/// Independent layout of many slides.
pub mod batch;
/// Rectangles and edge sizes.
pub mod box_model;
/// Engine configuration.
pub mod config;
/// Errors and non-fatal warnings.
pub mod error;
/// Shrink-to-fit font sizing.
pub mod fit;
/// Measure pass computing heights.
pub mod measure;
/// The input content tree.
pub mod node;
/// Stacking of top-level sections on a canvas.
pub mod sequencer;
/// Resolved style values.
pub mod style;
/// Text line-count estimation.
pub mod text_metrics;
/// Layout invariant checks.
pub mod validate;

// Re-exports for convenience
pub use arrange::{EmuRect, LayoutBox, arrange};
pub use batch::layout_slides;
pub use box_model::{EdgeSizes, Rect};
pub use config::{CanvasConfig, ConfigError, LayoutConfig};
pub use error::{LayoutError, LayoutWarning};
pub use fit::{FontFit, fit_font_size};
pub use measure::{Composition, MeasuredNode, Measurement, clamp_height, measure};
pub use node::{ContentNode, NodeId};
pub use sequencer::{SectionPlacement, SiblingSequencer, SlideLayout, layout_slide, layout_tree};
pub use style::{Background, Border, DisplayMode, StyleSpec, TextAlign};
pub use text_metrics::{CachedTextMeasurer, CharRangeWidth, CharWidthTable, RatioTextMeasurer, TextMeasurer};
pub use validate::{Violation, check_slide};
