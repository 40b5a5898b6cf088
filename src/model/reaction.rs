//! Reaction content types and per-comment reaction summaries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The reactions a viewer can leave on a comment.
///
/// Variant order is the display order of the reactions row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionContent {
    /// +1
    ThumbsUp,
    /// -1
    ThumbsDown,
    /// laugh
    Laugh,
    /// hooray
    Hooray,
    /// confused
    Confused,
    /// heart
    Heart,
    /// rocket
    Rocket,
    /// eyes
    Eyes,
}

impl ReactionContent {
    /// Every reaction, in display order.
    pub const ALL: [ReactionContent; 8] = [
        ReactionContent::ThumbsUp,
        ReactionContent::ThumbsDown,
        ReactionContent::Laugh,
        ReactionContent::Hooray,
        ReactionContent::Confused,
        ReactionContent::Heart,
        ReactionContent::Rocket,
        ReactionContent::Eyes,
    ];

    /// Short label, as typed in comments (`+1`, `heart`, ...).
    pub fn label(self) -> &'static str {
        match self {
            ReactionContent::ThumbsUp => "+1",
            ReactionContent::ThumbsDown => "-1",
            ReactionContent::Laugh => "laugh",
            ReactionContent::Hooray => "hooray",
            ReactionContent::Confused => "confused",
            ReactionContent::Heart => "heart",
            ReactionContent::Rocket => "rocket",
            ReactionContent::Eyes => "eyes",
        }
    }

    /// Emoji shown in the reactions row.
    pub fn emoji(self) -> &'static str {
        match self {
            ReactionContent::ThumbsUp => "👍",
            ReactionContent::ThumbsDown => "👎",
            ReactionContent::Laugh => "😄",
            ReactionContent::Hooray => "🎉",
            ReactionContent::Confused => "😕",
            ReactionContent::Heart => "❤️",
            ReactionContent::Rocket => "🚀",
            ReactionContent::Eyes => "👀",
        }
    }
}

impl fmt::Display for ReactionContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a reaction name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown reaction {0:?} (expected one of +1, -1, laugh, hooray, confused, heart, rocket, eyes)")]
pub struct UnknownReaction(pub String);

impl FromStr for ReactionContent {
    type Err = UnknownReaction;

    /// Accepts the short label or the GraphQL enum name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ReactionContent::ALL
            .into_iter()
            .find(|content| {
                content.label().eq_ignore_ascii_case(needle)
                    || graphql_name(*content).eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownReaction(s.to_string()))
    }
}

fn graphql_name(content: ReactionContent) -> &'static str {
    match content {
        ReactionContent::ThumbsUp => "THUMBS_UP",
        ReactionContent::ThumbsDown => "THUMBS_DOWN",
        ReactionContent::Laugh => "LAUGH",
        ReactionContent::Hooray => "HOORAY",
        ReactionContent::Confused => "CONFUSED",
        ReactionContent::Heart => "HEART",
        ReactionContent::Rocket => "ROCKET",
        ReactionContent::Eyes => "EYES",
    }
}

/// Count for one reaction type plus whether the viewer is among the reactors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionCount {
    /// Number of users who left this reaction.
    pub count: u32,
    /// Whether the viewing user left this reaction.
    #[serde(default)]
    pub viewer_reacted: bool,
}

impl ReactionCount {
    /// Create a new count.
    pub fn new(count: u32, viewer_reacted: bool) -> Self {
        Self {
            count,
            viewer_reacted,
        }
    }
}

/// Reaction counts for one comment, keyed by content type.
///
/// Absent keys read as zero. Iteration follows display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionSummary(BTreeMap<ReactionContent, ReactionCount>);

impl ReactionSummary {
    /// Empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `content`, zero if never reacted.
    pub fn get(&self, content: ReactionContent) -> ReactionCount {
        self.0.get(&content).copied().unwrap_or_default()
    }

    /// Overwrite the count for `content`.
    pub fn set(&mut self, content: ReactionContent, count: ReactionCount) {
        self.0.insert(content, count);
    }

    /// Builder-style `set`.
    pub fn with(mut self, content: ReactionContent, count: u32, viewer_reacted: bool) -> Self {
        self.set(content, ReactionCount::new(count, viewer_reacted));
        self
    }

    /// Summary after the viewer adds (`is_add`) or removes one `content` reaction.
    ///
    /// The count moves by one, saturating at zero, and `viewer_reacted`
    /// becomes `is_add`. Every other entry is untouched.
    pub fn with_edit(&self, content: ReactionContent, is_add: bool) -> Self {
        let mut next = self.clone();
        let current = self.get(content);
        let count = if is_add {
            current.count.saturating_add(1)
        } else {
            current.count.saturating_sub(1)
        };
        next.set(content, ReactionCount::new(count, is_add));
        next
    }

    /// Entries with a non-zero count, in display order.
    pub fn visible(&self) -> impl Iterator<Item = (ReactionContent, ReactionCount)> + '_ {
        self.0
            .iter()
            .filter(|(_, count)| count.count > 0)
            .map(|(content, count)| (*content, *count))
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.0.values().map(|count| u64::from(count.count)).sum()
    }

    /// Whether no reaction has a non-zero count.
    pub fn is_empty(&self) -> bool {
        self.visible().next().is_none()
    }
}

impl FromIterator<(ReactionContent, ReactionCount)> for ReactionSummary {
    fn from_iter<I: IntoIterator<Item = (ReactionContent, ReactionCount)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ReactionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (content, count) in self.visible() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{}:{}", content.label(), count.count)?;
            if count.viewer_reacted {
                f.write_str("*")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entry_reads_as_zero() {
        let summary = ReactionSummary::new();
        assert_eq!(summary.get(ReactionContent::Heart), ReactionCount::default());
        assert!(summary.is_empty());
    }

    #[test]
    fn with_edit_add_increments_and_marks_viewer() {
        let summary = ReactionSummary::new().with(ReactionContent::ThumbsUp, 2, false);
        let next = summary.with_edit(ReactionContent::ThumbsUp, true);
        assert_eq!(next.get(ReactionContent::ThumbsUp), ReactionCount::new(3, true));
        // receiver left untouched
        assert_eq!(summary.get(ReactionContent::ThumbsUp), ReactionCount::new(2, false));
    }

    #[test]
    fn with_edit_remove_saturates_at_zero() {
        let summary = ReactionSummary::new();
        let next = summary.with_edit(ReactionContent::Eyes, false);
        assert_eq!(next.get(ReactionContent::Eyes), ReactionCount::new(0, false));
    }

    #[test]
    fn with_edit_leaves_other_entries_alone() {
        let summary = ReactionSummary::new()
            .with(ReactionContent::Heart, 4, true)
            .with(ReactionContent::Rocket, 1, false);
        let next = summary.with_edit(ReactionContent::Rocket, true);
        assert_eq!(next.get(ReactionContent::Heart), ReactionCount::new(4, true));
        assert_eq!(next.get(ReactionContent::Rocket), ReactionCount::new(2, true));
    }

    #[test]
    fn visible_skips_zero_counts_in_display_order() {
        let summary = ReactionSummary::new()
            .with(ReactionContent::Eyes, 1, false)
            .with(ReactionContent::Laugh, 0, false)
            .with(ReactionContent::ThumbsUp, 5, true);
        let order: Vec<_> = summary.visible().map(|(content, _)| content).collect();
        assert_eq!(order, vec![ReactionContent::ThumbsUp, ReactionContent::Eyes]);
        assert_eq!(summary.total(), 6);
    }

    #[test]
    fn display_marks_viewer_reactions() {
        let summary = ReactionSummary::new()
            .with(ReactionContent::ThumbsUp, 3, true)
            .with(ReactionContent::Heart, 1, false);
        assert_eq!(summary.to_string(), "+1:3* heart:1");
    }

    #[test]
    fn parses_labels_and_graphql_names() {
        assert_eq!("+1".parse(), Ok(ReactionContent::ThumbsUp));
        assert_eq!("THUMBS_DOWN".parse(), Ok(ReactionContent::ThumbsDown));
        assert_eq!("Heart".parse(), Ok(ReactionContent::Heart));
        assert!("party".parse::<ReactionContent>().is_err());
    }

    #[test]
    fn summary_deserializes_from_graphql_keyed_object() {
        let json = r#"{"THUMBS_UP": {"count": 2, "viewerReacted": true}, "EYES": {"count": 1}}"#;
        let summary: ReactionSummary = serde_json::from_str(json).expect("valid summary");
        assert_eq!(summary.get(ReactionContent::ThumbsUp), ReactionCount::new(2, true));
        assert_eq!(summary.get(ReactionContent::Eyes), ReactionCount::new(1, false));
    }
}
