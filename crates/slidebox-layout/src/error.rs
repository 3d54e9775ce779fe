//! Errors and non-fatal layout warnings.
//!
//! A [`LayoutError`] fails a single call. Inside a tree pass, per-node
//! problems are downgraded to [`LayoutWarning`]s so the rest of the document
//! still lays out.

use serde::Serialize;
use thiserror::Error;

use crate::node::NodeId;

/// Failure of a single measurement or layout call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A width, height or font size that must be positive was not.
    #[error("invalid constraint: {what} must be positive and finite, got {value}")]
    InvalidConstraint {
        /// Which input was rejected.
        what: &'static str,
        /// The rejected value.
        value: f32,
    },
}

impl LayoutError {
    /// Check that `value` is positive and finite.
    pub(crate) fn require_positive(what: &'static str, value: f32) -> Result<f32, Self> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(Self::InvalidConstraint { what, value })
        }
    }
}

/// A condition surfaced alongside the layout output.
///
/// None of these abort a pass; the caller decides how severe each one is.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    /// Content needs more height than `max_height` allows; the box was clamped.
    #[error("node '{node_id}' overflows: content needs {content_height}px, max-height is {max_height}px")]
    Overflow {
        /// The clamped node.
        node_id: NodeId,
        /// Height the content asked for before clamping.
        content_height: f32,
        /// The height the box was clamped to.
        max_height: f32,
    },
    /// The display keyword is not one the engine implements; the node was
    /// laid out as a stack.
    #[error("node '{node_id}' has unknown display mode '{mode}', laid out as stack")]
    UnknownDisplayMode {
        /// The affected node.
        node_id: NodeId,
        /// The keyword as written.
        mode: String,
    },
    /// A leaf could not be measured; it collapsed to its padding box.
    #[error("node '{node_id}' could not be measured: {source}")]
    InvalidConstraint {
        /// The affected node.
        node_id: NodeId,
        /// Why measurement failed.
        #[serde(skip)]
        source: LayoutError,
    },
    /// `min_height` is larger than `max_height`; `min_height` was honored.
    #[error("node '{node_id}' has min-height {min_height}px above max-height {max_height}px")]
    ConflictingConstraints {
        /// The affected node.
        node_id: NodeId,
        /// Declared minimum.
        min_height: f32,
        /// Declared maximum.
        max_height: f32,
    },
    /// A container also carried text; the text was not laid out.
    #[error("node '{node_id}' has both text and children, text ignored")]
    IgnoredText {
        /// The affected node.
        node_id: NodeId,
    },
    /// Sequenced sections run past the usable canvas height.
    #[error("content ends at {content_bottom}px, past the usable canvas height of {usable_height}px")]
    CanvasOverflow {
        /// Bottom edge of the last section.
        content_bottom: f32,
        /// Canvas height minus the bottom reserve.
        usable_height: f32,
    },
}

impl LayoutWarning {
    /// The node the warning is about, if it concerns a single node.
    #[must_use]
    pub const fn node_id(&self) -> Option<&NodeId> {
        match self {
            Self::Overflow { node_id, .. }
            | Self::UnknownDisplayMode { node_id, .. }
            | Self::InvalidConstraint { node_id, .. }
            | Self::ConflictingConstraints { node_id, .. }
            | Self::IgnoredText { node_id } => Some(node_id),
            Self::CanvasOverflow { .. } => None,
        }
    }
}
