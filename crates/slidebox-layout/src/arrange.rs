//! Arrange pass: top-down positioning.
//!
//! Walks a [`MeasuredNode`] tree and emits one [`LayoutBox`] per placed node
//! in pre-order (a parent precedes its descendants). Heights are never
//! re-derived here; every box carries its measured height, or the row height
//! its parent stretched it to.

use serde::{Deserialize, Serialize};
use slidebox_common::units::px_to_emu;

use crate::box_model::Rect;
use crate::measure::{Composition, MeasuredNode};
use crate::node::NodeId;

/// A positioned padding box on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutBox {
    /// The node this box belongs to.
    pub node_id: NodeId,
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl LayoutBox {
    /// The box as a plain rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// The box in English Metric Units, for presentation-file writers.
    #[must_use]
    pub fn to_emu(&self) -> EmuRect {
        EmuRect {
            x: px_to_emu(self.x),
            y: px_to_emu(self.y),
            width: px_to_emu(self.width),
            height: px_to_emu(self.height),
        }
    }
}

/// A rectangle in English Metric Units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmuRect {
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
    /// Width.
    pub width: i64,
    /// Height.
    pub height: i64,
}

/// Position `measured` with its border box at `(x, y)` and emit the boxes of
/// its whole subtree.
///
/// Invisible stack children are skipped together with their subtrees. Row
/// and grid cells are always emitted since each one owns a slot.
#[must_use]
pub fn arrange(measured: &MeasuredNode<'_>, x: f32, y: f32) -> Vec<LayoutBox> {
    let mut arranger = Arranger {
        boxes: Vec::new(),
        #[cfg(feature = "layout-trace")]
        depth: 0,
    };
    arranger.place(measured, x, y, measured.height);
    arranger.boxes
}

struct Arranger {
    boxes: Vec<LayoutBox>,
    #[cfg(feature = "layout-trace")]
    depth: usize,
}

impl Arranger {
    fn place(&mut self, node: &MeasuredNode<'_>, x: f32, y: f32, height: f32) {
        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[ARRANGE] {:indent$}{} at ({x:.1}, {y:.1}) {:.1}x{height:.1}",
            "",
            node.id(),
            node.width,
            indent = self.depth * 2
        );

        self.boxes.push(LayoutBox {
            node_id: node.id().clone(),
            x,
            y,
            width: node.width,
            height,
        });

        #[cfg(feature = "layout-trace")]
        {
            self.depth += 1;
        }

        let content = Rect::new(x, y, node.width, height).inset(&node.padding());
        let (left, top) = (content.x, content.y);
        let gap = node.gap();
        let column_step = node.slot_width + gap;

        match node.composition {
            Composition::Leaf => {}
            Composition::Stack => {
                let mut cursor_y = top;
                for (index, child) in node
                    .children
                    .iter()
                    .filter(|child| child.is_visible())
                    .enumerate()
                {
                    if index > 0 {
                        cursor_y += gap;
                    }
                    let margin = child.margin();
                    self.place(child, left + margin.left, cursor_y + margin.top, child.height);
                    cursor_y += child.outer_height();
                }
            }
            Composition::Row => {
                let row_height = node.row_heights.first().copied().unwrap_or(0.0);
                for (column, child) in node.children.iter().enumerate() {
                    self.place_cell(child, left + column as f32 * column_step, top, row_height);
                }
            }
            Composition::Grid { columns } => {
                // STEP 1: Walk rows, advancing by each row's own height.
                let mut row_y = top;
                for (row, cells) in node.children.chunks(columns).enumerate() {
                    let row_height = node.row_heights.get(row).copied().unwrap_or(0.0);
                    // STEP 2: Columns share one cell width.
                    for (column, child) in cells.iter().enumerate() {
                        self.place_cell(child, left + column as f32 * column_step, row_y, row_height);
                    }
                    row_y += row_height + gap;
                }
            }
        }

        #[cfg(feature = "layout-trace")]
        {
            self.depth -= 1;
        }
    }

    /// A cell fills its slot's row, inset by its own margins.
    fn place_cell(&mut self, child: &MeasuredNode<'_>, slot_x: f32, row_y: f32, row_height: f32) {
        let margin = child.margin();
        self.place(
            child,
            slot_x + margin.left,
            row_y + margin.top,
            child.stretched_height(row_height),
        );
    }
}
