//! Invariant checks over measured trees and emitted boxes.
//!
//! These never change a layout. They exist for test suites and the CLI's
//! `--check` mode, and return every violation found rather than stopping at
//! the first.

use std::collections::HashMap;

use thiserror::Error;

use crate::arrange::{LayoutBox, arrange};
use crate::box_model::non_negative;
use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::measure::{Composition, MeasuredNode, clamp_height, measure};
use crate::node::{ContentNode, NodeId};
use crate::sequencer::{SlideLayout, layout_slide};
use crate::text_metrics::TextMeasurer;

/// Tolerance for comparing pixel coordinates.
const EPSILON: f32 = 1e-3;

/// A broken layout invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    /// A node's height is not its raw height clamped to `[min, max]`.
    #[error("node '{node_id}' has height {height}px, expected {expected}px after clamping")]
    Clamp {
        /// The node.
        node_id: NodeId,
        /// Measured height.
        height: f32,
        /// Height the constraints imply.
        expected: f32,
    },
    /// A visible node has no emitted box.
    #[error("node '{node_id}' was measured but not emitted")]
    MissingBox {
        /// The node.
        node_id: NodeId,
    },
    /// Two nodes share an id, so boxes cannot be matched to nodes.
    #[error("node id '{node_id}' is used more than once")]
    DuplicateId {
        /// The repeated id.
        node_id: NodeId,
    },
    /// An emitted box is shorter than its measured height, or a stack child
    /// was emitted at a height other than its measured one.
    #[error("node '{node_id}' was measured at {measured}px but emitted at {emitted}px")]
    HeightMismatch {
        /// The node.
        node_id: NodeId,
        /// Height from the measure pass.
        measured: f32,
        /// Height of the emitted box.
        emitted: f32,
    },
    /// Consecutive stack children overlap or are out of order.
    #[error("stack children '{first}' and '{second}' overlap")]
    StackOverlap {
        /// Earlier child.
        first: NodeId,
        /// Later child.
        second: NodeId,
    },
    /// Two row or grid cells of the same parent intersect.
    #[error("cells '{first}' and '{second}' overlap")]
    CellOverlap {
        /// Earlier cell.
        first: NodeId,
        /// Later cell.
        second: NodeId,
    },
    /// Consecutive top-level sections overlap.
    #[error("sections '{first}' and '{second}' overlap")]
    SectionOverlap {
        /// Upper section.
        first: NodeId,
        /// Lower section.
        second: NodeId,
    },
    /// Two passes over the same input gave different boxes.
    #[error("layout is not deterministic: two passes emitted different boxes")]
    NonDeterministic,
}

/// Check the clamp invariant on every node of a measured tree.
#[must_use]
pub fn check_measured(root: &MeasuredNode<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();
    collect_clamp_violations(root, &mut violations);
    violations
}

/// Check emitted `boxes` against the measured tree they came from.
#[must_use]
pub fn check_boxes(root: &MeasuredNode<'_>, boxes: &[LayoutBox]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut by_id: HashMap<&NodeId, &LayoutBox> = HashMap::with_capacity(boxes.len());
    for b in boxes {
        if by_id.insert(&b.node_id, b).is_some() {
            violations.push(Violation::DuplicateId {
                node_id: b.node_id.clone(),
            });
        }
    }
    let checker = BoxChecker { by_id };
    checker.check_node(root, false, &mut violations);
    violations
}

/// Check that sections are placed top to bottom without overlapping.
#[must_use]
pub fn check_sections(slide: &SlideLayout) -> Vec<Violation> {
    slide
        .sections
        .windows(2)
        .filter(|pair| pair[1].y + EPSILON < pair[0].bottom())
        .map(|pair| Violation::SectionOverlap {
            first: pair[0].node_id.clone(),
            second: pair[1].node_id.clone(),
        })
        .collect()
}

/// Lay out `sections` and run every check over the result.
///
/// Each section is measured and arranged on its own for the tree checks,
/// then the whole slide is laid out twice to confirm determinism.
///
/// # Errors
///
/// [`LayoutError::InvalidConstraint`] if the canvas has no content width.
pub fn check_slide(
    sections: &[ContentNode],
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> Result<Vec<Violation>, LayoutError> {
    let first = layout_slide(sections, config, measurer)?;
    let second = layout_slide(sections, config, measurer)?;

    let mut violations = check_sections(&first);
    if first.boxes != second.boxes {
        violations.push(Violation::NonDeterministic);
    }

    for section in sections {
        let width = config.canvas.section_width(section);
        // Unmeasurable sections are already reported as layout warnings.
        let Ok(measured) = measure(section, width, config, measurer) else {
            continue;
        };
        violations.extend(check_measured(&measured.root));
        if measured.root.is_visible() {
            let boxes = arrange(&measured.root, 0.0, 0.0);
            violations.extend(check_boxes(&measured.root, &boxes));
        }
    }
    Ok(violations)
}

fn collect_clamp_violations(node: &MeasuredNode<'_>, out: &mut Vec<Violation>) {
    let style = node.style();
    let (expected, _) = clamp_height(
        node.raw_height,
        style.min_height.map(non_negative),
        style.max_height.map(non_negative),
    );
    if (node.height - expected).abs() > EPSILON {
        out.push(Violation::Clamp {
            node_id: node.id().clone(),
            height: node.height,
            expected,
        });
    }
    for child in &node.children {
        collect_clamp_violations(child, out);
    }
}

struct BoxChecker<'b> {
    by_id: HashMap<&'b NodeId, &'b LayoutBox>,
}

impl BoxChecker<'_> {
    /// `stretched` nodes may be emitted taller than measured.
    fn check_node(&self, node: &MeasuredNode<'_>, stretched: bool, out: &mut Vec<Violation>) {
        let Some(own) = self.by_id.get(node.id()) else {
            out.push(Violation::MissingBox {
                node_id: node.id().clone(),
            });
            return;
        };
        let too_short = own.height + EPSILON < node.height;
        let resized = !stretched && (own.height - node.height).abs() > EPSILON;
        if too_short || resized {
            out.push(Violation::HeightMismatch {
                node_id: node.id().clone(),
                measured: node.height,
                emitted: own.height,
            });
        }

        match node.composition {
            Composition::Leaf => {}
            Composition::Stack => {
                let visible: Vec<&MeasuredNode<'_>> =
                    node.children.iter().filter(|c| c.is_visible()).collect();
                for child in &visible {
                    self.check_node(child, false, out);
                }
                for pair in visible.windows(2) {
                    let (Some(upper), Some(lower)) =
                        (self.by_id.get(pair[0].id()), self.by_id.get(pair[1].id()))
                    else {
                        continue;
                    };
                    if lower.y + EPSILON < upper.bottom() {
                        out.push(Violation::StackOverlap {
                            first: pair[0].id().clone(),
                            second: pair[1].id().clone(),
                        });
                    }
                }
            }
            Composition::Row | Composition::Grid { .. } => {
                for child in &node.children {
                    self.check_node(child, true, out);
                }
                let cells: Vec<(&NodeId, &LayoutBox)> = node
                    .children
                    .iter()
                    .filter_map(|c| self.by_id.get(c.id()).map(|b| (c.id(), *b)))
                    .collect();
                for (i, (first, a)) in cells.iter().enumerate() {
                    for (second, b) in &cells[i + 1..] {
                        if a.rect().intersects(&b.rect()) {
                            out.push(Violation::CellOverlap {
                                first: (*first).clone(),
                                second: (*second).clone(),
                            });
                        }
                    }
                }
            }
        }
    }
}
