//! Thread position to section inset and border mapping.

use super::types::{Borders, Insets};
use crate::model::ThreadPosition;

/// Inset values for the two non-zero thread positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadInsets {
    /// Inset of a stand-alone comment.
    pub large: Insets,
    /// Inset of the last comment in a thread.
    pub large_tail: Insets,
}

impl Default for ThreadInsets {
    fn default() -> Self {
        Self {
            large: Insets::new(15, 10, 15, 10),
            large_tail: Insets::new(0, 10, 15, 10),
        }
    }
}

impl ThreadInsets {
    /// Section inset for `position`. Pure; recomputed on every bind.
    pub fn resolve(&self, position: ThreadPosition) -> Insets {
        match position {
            ThreadPosition::Single => self.large,
            ThreadPosition::Neck => Insets::ZERO,
            ThreadPosition::Tail => self.large_tail,
        }
    }
}

/// Borders drawn for `position`: the details row only when stand-alone, the
/// reactions row when stand-alone or closing a thread.
pub fn borders(position: ThreadPosition) -> Borders {
    Borders {
        details: position == ThreadPosition::Single,
        reactions: matches!(position, ThreadPosition::Single | ThreadPosition::Tail),
    }
}
