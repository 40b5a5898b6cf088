//! Projection of one comment into its ordered renderable list.
//!
//! The list is always `[Details] ++ body ++ [Reactions]`. While collapsed,
//! the body stops at the collapse marker and later segments are omitted.

use super::collapse::CollapseState;
use crate::model::{BodySegment, Comment, CommentDetails, ReactionSummary, SegmentKey};
use crate::state::overlay::ReactionOverlayState;

/// One presentation unit of a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderableItem {
    /// Header row: author, date, actions.
    Details(CommentDetails),
    /// One body segment.
    Body {
        /// Content-derived identity of the segment.
        key: SegmentKey,
        /// The segment itself.
        segment: BodySegment,
    },
    /// Reactions row, showing the overlay when one is active.
    Reactions(ReactionSummary),
}

/// Stable identity of a renderable item within one comment.
///
/// Used for diffing across rebinds and for liveness checks of rendering
/// contexts. Never compares object identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKey {
    /// The header row.
    Details,
    /// A body segment.
    Body(SegmentKey),
    /// The reactions row.
    Reactions,
}

impl RenderableItem {
    /// Identity of this item.
    pub fn key(&self) -> ItemKey {
        match self {
            RenderableItem::Details(_) => ItemKey::Details,
            RenderableItem::Body { key, .. } => ItemKey::Body(*key),
            RenderableItem::Reactions(_) => ItemKey::Reactions,
        }
    }

    /// Body position when this is a body item.
    pub fn body_index(&self) -> Option<usize> {
        match self {
            RenderableItem::Body { key, .. } => Some(key.index()),
            _ => None,
        }
    }

    /// Short kind name used in logs and plan output.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderableItem::Details(_) => "details",
            RenderableItem::Body { segment, .. } => segment.kind(),
            RenderableItem::Reactions(_) => "reactions",
        }
    }
}

/// Build the renderable list for `comment`.
///
/// Pure: the same inputs always produce the same list. Reactions come from
/// `overlay` when present, otherwise from the canonical summary.
pub fn project(
    comment: &Comment,
    state: CollapseState,
    overlay: Option<&ReactionOverlayState>,
) -> Vec<RenderableItem> {
    let stop_at = match state {
        CollapseState::Collapsed => comment.collapse().map(|marker| marker.index),
        CollapseState::Expanded => None,
    };

    let mut items = Vec::with_capacity(comment.body().len() + 2);
    items.push(RenderableItem::Details(comment.details()));

    for (index, segment) in comment.body().iter().enumerate() {
        items.push(RenderableItem::Body {
            key: SegmentKey::of(index, segment),
            segment: segment.clone(),
        });
        if stop_at == Some(index) {
            break;
        }
    }

    let reactions = overlay
        .map(|overlay| overlay.summary().clone())
        .unwrap_or_else(|| comment.reactions().clone());
    items.push(RenderableItem::Reactions(reactions));

    items
}
