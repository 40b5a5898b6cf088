//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod comment;
pub mod error;
pub mod identifiers;
pub mod reaction;

// Re-export for convenience
pub use comment::{BodySegment, CollapseMarker, Comment, CommentDetails, SegmentKey, ThreadPosition};
pub use identifiers::{CommentId, InvalidCommentId, InvalidIssueRef, IssueRef};
pub use reaction::{ReactionContent, ReactionCount, ReactionSummary, UnknownReaction};
