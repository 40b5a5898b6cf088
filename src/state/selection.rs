//! Tap routing for renderable items.

use crate::view_state::{CollapseController, CollapseTransition, RenderableItem};

/// Route a tap on `item`.
///
/// Taps on the details or reactions rows never expand; their controls handle
/// their own interactions. A tap anywhere in the body expands.
pub fn on_select(item: &RenderableItem, collapse: &mut CollapseController) -> CollapseTransition {
    match item {
        RenderableItem::Details(_) | RenderableItem::Reactions(_) => CollapseTransition::Unchanged,
        RenderableItem::Body { .. } => collapse.expand(),
    }
}
