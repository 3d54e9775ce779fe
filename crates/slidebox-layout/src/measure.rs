//! Measure pass: bottom-up height computation.
//!
//! Widths flow down (each parent hands its children a slot width), heights
//! flow up (each parent sums or maxes its children's heights). Every node is
//! visited exactly once and the resulting [`MeasuredNode`] tree is immutable
//! input to the arrange pass.

use std::collections::BTreeSet;

use slidebox_common::warning::warn_once;

use crate::box_model::{EdgeSizes, non_negative};
use crate::config::LayoutConfig;
use crate::error::{LayoutError, LayoutWarning};
use crate::node::{ContentNode, NodeId};
use crate::style::{DisplayMode, StyleSpec};
use crate::text_metrics::TextMeasurer;

/// The composition rule actually applied to a node.
///
/// Unlike [`DisplayMode`] this has no unknown variant: unrecognized modes
/// have already fallen back to [`Composition::Stack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    /// No children; height comes from wrapped text.
    Leaf,
    /// Vertical flow.
    Stack,
    /// One line of equal-width slots.
    Row,
    /// Fixed columns wrapping into rows.
    Grid {
        /// Number of columns, at least one.
        columns: usize,
    },
}

/// A node with its measured geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredNode<'a> {
    /// The content node this measurement belongs to.
    pub node: &'a ContentNode,
    /// Composition applied to the children.
    pub composition: Composition,
    /// Border-box width assigned by the parent.
    pub width: f32,
    /// Final height after min/max clamping.
    pub height: f32,
    /// Height the content asked for before clamping.
    pub raw_height: f32,
    /// Whether `raw_height` exceeded `max_height`.
    pub overflow: bool,
    /// Wrapped line count (leaves only).
    pub line_count: usize,
    /// Width of one child slot: the content width for stacks, a column for
    /// rows and grids.
    pub slot_width: f32,
    /// Outer height of each row (one entry for [`Composition::Row`], one per
    /// row for [`Composition::Grid`], empty otherwise).
    pub row_heights: Vec<f32>,
    /// Measured children, in document order.
    pub children: Vec<MeasuredNode<'a>>,
}

impl MeasuredNode<'_> {
    /// Id of the underlying node.
    #[must_use]
    pub fn id(&self) -> &NodeId {
        &self.node.id
    }

    /// Style of the underlying node.
    #[must_use]
    pub fn style(&self) -> &StyleSpec {
        &self.node.style
    }

    /// Padding with negative sides treated as zero.
    #[must_use]
    pub fn padding(&self) -> EdgeSizes {
        self.node.style.padding.sanitized()
    }

    /// Margin with negative sides treated as zero.
    #[must_use]
    pub fn margin(&self) -> EdgeSizes {
        self.node.style.margin.sanitized()
    }

    /// Inter-child gap, never negative.
    #[must_use]
    pub fn gap(&self) -> f32 {
        non_negative(self.node.style.gap)
    }

    /// Width inside the padding.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        (self.width - self.padding().horizontal()).max(0.0)
    }

    /// A node is visible when it measured taller than zero.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.height > 0.0
    }

    /// Height including vertical margins. Invisible nodes take no space at all.
    #[must_use]
    pub fn outer_height(&self) -> f32 {
        if self.is_visible() {
            self.height + self.margin().vertical()
        } else {
            0.0
        }
    }

    /// Height of this node's box when its parent stretches it into a row of
    /// outer height `row_height`.
    ///
    /// The box fills the row minus its own vertical margins, but never
    /// shrinks below its measured height nor grows past its `max_height`.
    #[must_use]
    pub fn stretched_height(&self, row_height: f32) -> f32 {
        let mut height = (row_height - self.margin().vertical()).max(self.height);
        if let Some(max) = self.node.style.max_height.map(non_negative) {
            height = height.min(max.max(self.height));
        }
        height
    }

    /// Find a measured node by id (pre-order).
    #[must_use]
    pub fn find(&self, id: &NodeId) -> Option<&Self> {
        if self.id() == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// Result of measuring one tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement<'a> {
    /// The measured root.
    pub root: MeasuredNode<'a>,
    /// Warnings raised while measuring, in visiting order.
    pub warnings: Vec<LayoutWarning>,
    /// Ids of every node whose content overflowed its `max_height`.
    pub overflow: BTreeSet<NodeId>,
}

/// Measure `node` (and its whole subtree) at border-box width `width`.
///
/// # Errors
///
/// [`LayoutError::InvalidConstraint`] if `width` is not positive and finite.
/// Problems inside the tree never fail the call; they are reported in
/// [`Measurement::warnings`].
pub fn measure<'a>(
    node: &'a ContentNode,
    width: f32,
    config: &LayoutConfig,
    text: &dyn TextMeasurer,
) -> Result<Measurement<'a>, LayoutError> {
    let width = LayoutError::require_positive("layout width", width)?;
    let mut pass = MeasurePass {
        config,
        text,
        warnings: Vec::new(),
        overflow: BTreeSet::new(),
        #[cfg(feature = "layout-trace")]
        depth: 0,
    };
    let root = pass.measure_node(node, width);
    Ok(Measurement {
        root,
        warnings: pass.warnings,
        overflow: pass.overflow,
    })
}

/// Clamp a content height to optional `[min, max]` bounds.
///
/// Returns the clamped height and whether the content overflowed `max`.
/// When `min > max`, `min` wins.
#[must_use]
pub fn clamp_height(raw: f32, min: Option<f32>, max: Option<f32>) -> (f32, bool) {
    let mut height = raw;
    let mut overflow = false;
    if let Some(max) = max
        && raw > max
    {
        height = max;
        overflow = true;
    }
    if let Some(min) = min {
        height = height.max(min);
    }
    (height, overflow)
}

/// Width of one of `slots` equal slots separated by `gap`.
pub(crate) fn slot_width(content_width: f32, gap: f32, slots: usize) -> f32 {
    if slots <= 1 {
        return content_width;
    }
    let gaps = gap * (slots - 1) as f32;
    ((content_width - gaps) / slots as f32).max(0.0)
}

/// Mutable state of one measure pass.
struct MeasurePass<'c> {
    config: &'c LayoutConfig,
    text: &'c dyn TextMeasurer,
    warnings: Vec<LayoutWarning>,
    overflow: BTreeSet<NodeId>,
    #[cfg(feature = "layout-trace")]
    depth: usize,
}

impl MeasurePass<'_> {
    fn measure_node<'a>(&mut self, node: &'a ContentNode, width: f32) -> MeasuredNode<'a> {
        let style = &node.style;
        let padding = style.padding.sanitized();
        let gap = non_negative(style.gap);
        let content_width = (width - padding.horizontal()).max(0.0);
        let composition = self.composition_for(node);

        // STEP 1: Measure children at the slot width this composition hands down.
        #[cfg(feature = "layout-trace")]
        {
            self.depth += 1;
        }
        let slot = match composition {
            Composition::Leaf | Composition::Stack => content_width,
            Composition::Row => slot_width(content_width, gap, node.children.len()),
            Composition::Grid { columns } => slot_width(content_width, gap, columns),
        };
        let children: Vec<MeasuredNode<'a>> = node
            .children
            .iter()
            .map(|child| self.measure_child(child, slot))
            .collect();
        #[cfg(feature = "layout-trace")]
        {
            self.depth -= 1;
        }

        // STEP 2: Content height from the composition rule.
        let mut line_count = 0;
        let mut row_heights = Vec::new();
        let content_height = match composition {
            Composition::Leaf => {
                line_count = self.leaf_lines(node, content_width);
                let font_size = style
                    .font_size_px
                    .unwrap_or(self.config.default_font_size_px);
                let line_height = style
                    .line_height_multiplier
                    .unwrap_or(self.config.default_line_height);
                line_count as f32 * non_negative(line_height) * non_negative(font_size)
            }
            Composition::Stack => stack_content_height(&children, gap),
            Composition::Row => {
                let row = max_outer_height(&children);
                row_heights.push(row);
                row
            }
            Composition::Grid { columns } => {
                row_heights = children
                    .chunks(columns)
                    .map(max_outer_height)
                    .collect();
                let gaps = gap * row_heights.len().saturating_sub(1) as f32;
                row_heights.iter().sum::<f32>() + gaps
            }
        };
        // Text that wrapped to no lines takes no space, padding included.
        let raw_height = if composition == Composition::Leaf && line_count == 0 {
            0.0
        } else {
            padding.vertical() + content_height
        };

        // STEP 3: Clamp to min/max and surface overflow.
        let (height, overflow) = self.clamp(node, raw_height);

        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[MEASURE] {:indent$}{} {:?} width={width:.1} raw={raw_height:.1} height={height:.1}{}",
            "",
            node.id,
            composition,
            if overflow { " OVERFLOW" } else { "" },
            indent = self.depth * 2
        );

        MeasuredNode {
            node,
            composition,
            width,
            height,
            raw_height,
            overflow,
            line_count,
            slot_width: slot,
            row_heights,
            children,
        }
    }

    /// A child's border box is its slot minus its horizontal margins.
    fn measure_child<'a>(&mut self, child: &'a ContentNode, slot: f32) -> MeasuredNode<'a> {
        let margin = child.style.margin.sanitized();
        self.measure_node(child, (slot - margin.horizontal()).max(0.0))
    }

    fn composition_for(&mut self, node: &ContentNode) -> Composition {
        if node.is_leaf() {
            return Composition::Leaf;
        }
        if !node.text_content().is_empty() {
            self.warnings.push(LayoutWarning::IgnoredText {
                node_id: node.id.clone(),
            });
        }
        match &node.style.display {
            DisplayMode::Stack => Composition::Stack,
            DisplayMode::Row => Composition::Row,
            DisplayMode::Grid { columns } if *columns > 0 => Composition::Grid { columns: *columns },
            DisplayMode::Grid { .. } | DisplayMode::Unknown(_) => {
                let mode = node.style.display.to_string();
                let _ = warn_once(
                    "Layout",
                    &format!("unknown display mode '{mode}', laid out as stack"),
                );
                self.warnings.push(LayoutWarning::UnknownDisplayMode {
                    node_id: node.id.clone(),
                    mode,
                });
                Composition::Stack
            }
        }
    }

    fn leaf_lines(&mut self, node: &ContentNode, available_width: f32) -> usize {
        let text = node.text_content();
        if text.is_empty() {
            return 0;
        }
        let font_size = node
            .style
            .font_size_px
            .unwrap_or(self.config.default_font_size_px);
        match self.text.measure_lines(text, font_size, available_width) {
            Ok(lines) => lines,
            Err(source) => {
                self.warnings.push(LayoutWarning::InvalidConstraint {
                    node_id: node.id.clone(),
                    source,
                });
                0
            }
        }
    }

    fn clamp(&mut self, node: &ContentNode, raw_height: f32) -> (f32, bool) {
        let min = node.style.min_height.map(non_negative);
        let max = node.style.max_height.map(non_negative);
        if let (Some(min_height), Some(max_height)) = (min, max)
            && min_height > max_height
        {
            self.warnings.push(LayoutWarning::ConflictingConstraints {
                node_id: node.id.clone(),
                min_height,
                max_height,
            });
        }

        let (height, overflow) = clamp_height(raw_height, min, max);
        if overflow {
            self.warnings.push(LayoutWarning::Overflow {
                node_id: node.id.clone(),
                content_height: raw_height,
                max_height: max.unwrap_or(height),
            });
            let _ = self.overflow.insert(node.id.clone());
        }
        (height, overflow)
    }
}

/// `Σ outer heights + gap × (visible − 1)`; invisible children take no gap.
fn stack_content_height(children: &[MeasuredNode<'_>], gap: f32) -> f32 {
    let visible: Vec<f32> = children
        .iter()
        .filter(|child| child.is_visible())
        .map(MeasuredNode::outer_height)
        .collect();
    let gaps = gap * visible.len().saturating_sub(1) as f32;
    visible.iter().sum::<f32>() + gaps
}

/// Tallest outer height among `children`, zero when empty.
fn max_outer_height(children: &[MeasuredNode<'_>]) -> f32 {
    children
        .iter()
        .map(MeasuredNode::outer_height)
        .fold(0.0, f32::max)
}
