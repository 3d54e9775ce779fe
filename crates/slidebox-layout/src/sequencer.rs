//! Vertical sequencing of top-level sections on a slide canvas.
//!
//! Each section is measured and arranged independently, then stacked down
//! the canvas: the first at `initial_offset`, every following one a
//! section gap below the bottom of the previous one.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::arrange::{LayoutBox, arrange};
use crate::config::LayoutConfig;
use crate::error::{LayoutError, LayoutWarning};
use crate::measure::measure;
use crate::node::{ContentNode, NodeId};
use crate::text_metrics::TextMeasurer;

/// Where one top-level section ended up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionPlacement {
    /// Root node of the section.
    pub node_id: NodeId,
    /// Left edge of the section's box.
    pub x: f32,
    /// Top edge of the section's box.
    pub y: f32,
    /// Width of the section's box.
    pub width: f32,
    /// Height of the section's box.
    pub height: f32,
}

impl SectionPlacement {
    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Complete layout of one slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlideLayout {
    /// Every emitted box, section by section, each section in pre-order.
    pub boxes: Vec<LayoutBox>,
    /// Nodes whose content was clamped by `max_height`.
    pub overflow: BTreeSet<NodeId>,
    /// Non-fatal conditions, in the order they were found.
    pub warnings: Vec<LayoutWarning>,
    /// One entry per placed section, top to bottom.
    pub sections: Vec<SectionPlacement>,
}

impl SlideLayout {
    /// The box emitted for `id`, if any.
    #[must_use]
    pub fn box_for(&self, id: &NodeId) -> Option<&LayoutBox> {
        self.boxes.iter().find(|b| &b.node_id == id)
    }

    /// Whether `id` overflowed its `max_height`.
    #[must_use]
    pub fn is_overflowing(&self, id: &NodeId) -> bool {
        self.overflow.contains(id)
    }

    /// Bottom edge of the last placed section, zero for an empty slide.
    #[must_use]
    pub fn content_bottom(&self) -> f32 {
        self.sections.last().map_or(0.0, SectionPlacement::bottom)
    }

    /// Whether anything was reported.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Places top-level sections one below the other.
pub struct SiblingSequencer<'c> {
    config: &'c LayoutConfig,
    measurer: &'c dyn TextMeasurer,
    gap: f32,
    initial_offset: f32,
}

impl<'c> SiblingSequencer<'c> {
    /// Sequencer using the configured section gap and initial offset.
    #[must_use]
    pub fn new(config: &'c LayoutConfig, measurer: &'c dyn TextMeasurer) -> Self {
        Self {
            config,
            measurer,
            gap: config.section_gap,
            initial_offset: config.initial_offset,
        }
    }

    /// Override the gap between sections.
    #[must_use]
    pub const fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Override the y coordinate of the first section.
    #[must_use]
    pub const fn with_initial_offset(mut self, offset: f32) -> Self {
        self.initial_offset = offset;
        self
    }

    /// Lay out `sections` in order.
    ///
    /// Sections that measure to zero height are skipped and consume no gap.
    /// A section that cannot be measured at all (its margins leave no width)
    /// is skipped with an [`LayoutWarning::InvalidConstraint`].
    ///
    /// # Errors
    ///
    /// [`LayoutError::InvalidConstraint`] if the canvas has no content width.
    pub fn layout(&self, sections: &[ContentNode]) -> Result<SlideLayout, LayoutError> {
        let canvas = &self.config.canvas;
        let _ = LayoutError::require_positive("canvas content width", canvas.content_width())?;
        let gap = self.gap.max(0.0);

        let mut slide = SlideLayout::default();
        let mut cursor_y = self.initial_offset;
        for section in sections {
            let margin = section.style.margin.sanitized();
            let width = canvas.section_width(section);
            let measured = match measure(section, width, self.config, self.measurer) {
                Ok(measured) => measured,
                Err(source) => {
                    slide.warnings.push(LayoutWarning::InvalidConstraint {
                        node_id: section.id.clone(),
                        source,
                    });
                    continue;
                }
            };
            slide.warnings.extend(measured.warnings);
            slide.overflow.extend(measured.overflow);

            let root = &measured.root;
            if !root.is_visible() {
                continue;
            }
            if !slide.sections.is_empty() {
                cursor_y += gap;
            }
            let x = canvas.margin_left + margin.left;
            let y = cursor_y + margin.top;

            #[cfg(feature = "layout-trace")]
            eprintln!(
                "[SEQUENCE] section {} at y={y:.1} height={:.1}",
                root.id(),
                root.height
            );

            slide.boxes.extend(arrange(root, x, y));
            slide.sections.push(SectionPlacement {
                node_id: root.id().clone(),
                x,
                y,
                width: root.width,
                height: root.height,
            });
            cursor_y = y + root.height + margin.bottom;
        }

        let content_bottom = slide.content_bottom();
        let usable_height = canvas.usable_height();
        if content_bottom > usable_height {
            slide.warnings.push(LayoutWarning::CanvasOverflow {
                content_bottom,
                usable_height,
            });
        }
        Ok(slide)
    }
}

/// Lay out one slide's sections with the configured gap and offset.
///
/// # Errors
///
/// [`LayoutError::InvalidConstraint`] if the canvas has no content width.
pub fn layout_slide(
    sections: &[ContentNode],
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> Result<SlideLayout, LayoutError> {
    SiblingSequencer::new(config, measurer).layout(sections)
}

/// Measure and arrange a single tree with its border box at `(x, y)`.
///
/// The result has one section entry when the tree is visible and none
/// otherwise. No canvas fit check is made.
///
/// # Errors
///
/// [`LayoutError::InvalidConstraint`] if `width` is not positive and finite.
pub fn layout_tree(
    node: &ContentNode,
    x: f32,
    y: f32,
    width: f32,
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> Result<SlideLayout, LayoutError> {
    let measured = measure(node, width, config, measurer)?;
    let root = &measured.root;
    let mut slide = SlideLayout::default();
    if root.is_visible() {
        slide.boxes = arrange(root, x, y);
        slide.sections.push(SectionPlacement {
            node_id: root.id().clone(),
            x,
            y,
            width: root.width,
            height: root.height,
        });
    }
    slide.warnings = measured.warnings;
    slide.overflow = measured.overflow;
    Ok(slide)
}
