//! Collapse/expand state machine for a comment body.
//!
//! `Collapsed` is the initial state and `Expanded` is terminal: there is no
//! transition back. A comment without a collapse marker renders the same in
//! either state.

use super::projector::RenderableItem;
use crate::model::CollapseMarker;
use tracing::debug;

/// Whether the body is truncated at its collapse marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollapseState {
    /// Body stops at the marker segment.
    #[default]
    Collapsed,
    /// Full body shown. Terminal.
    Expanded,
}

/// Result of asking the controller to expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum CollapseTransition {
    /// Already expanded; nothing to do.
    Unchanged,
    /// Switched from collapsed to expanded. Visible collapse affordances
    /// must be cleared before the next render.
    Expanded,
}

/// Owner of the collapse flag for one comment.
#[derive(Debug, Clone, Default)]
pub struct CollapseController {
    state: CollapseState,
}

impl CollapseController {
    /// New controller in the `Collapsed` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> CollapseState {
        self.state
    }

    /// Whether the body is currently collapsed.
    pub fn is_collapsed(&self) -> bool {
        self.state == CollapseState::Collapsed
    }

    /// Expand the body. Idempotent.
    pub fn expand(&mut self) -> CollapseTransition {
        match self.state {
            CollapseState::Expanded => CollapseTransition::Unchanged,
            CollapseState::Collapsed => {
                self.state = CollapseState::Expanded;
                debug!("comment body expanded");
                CollapseTransition::Expanded
            }
        }
    }

    /// Whether a cell showing `item` must display the collapsed-preview
    /// affordance (fade and "show more" overlay).
    pub fn affordance_visible(&self, item: &RenderableItem, marker: Option<CollapseMarker>) -> bool {
        self.is_collapsed() && is_marker_item(item, marker)
    }
}

/// Whether `item` is the body segment the collapse marker points at.
pub fn is_marker_item(item: &RenderableItem, marker: Option<CollapseMarker>) -> bool {
    match (item.body_index(), marker) {
        (Some(index), Some(marker)) => index == marker.index,
        _ => false,
    }
}
