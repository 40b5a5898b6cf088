//! The canonical comment record delivered by the sync layer.
//!
//! A `Comment` is produced fresh on every bind and never mutated by the
//! view layer; optimistic edits live in the reaction overlay instead.

use super::identifiers::{CommentId, IssueRef};
use super::reaction::ReactionSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{DefaultHasher, Hash, Hasher};

/// Position of a comment within a visual thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThreadPosition {
    /// Stand-alone comment (first and only).
    #[default]
    Single,
    /// Middle of a thread.
    Neck,
    /// Last comment of a thread.
    Tail,
}

/// One piece of a comment body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BodySegment {
    /// Plain text measured locally.
    Text {
        /// Text content.
        text: String,
    },
    /// Rich markup rendered and measured by an external renderer.
    Markup {
        /// Raw markup source; also the measurement cache key.
        html: String,
    },
    /// Remote image measured once loaded.
    Image {
        /// Image location.
        url: String,
        /// Natural width when known ahead of loading.
        #[serde(default, rename = "widthHint")]
        width_hint: Option<u32>,
    },
}

impl BodySegment {
    /// Plain text segment.
    pub fn text(text: impl Into<String>) -> Self {
        BodySegment::Text { text: text.into() }
    }

    /// Markup segment.
    pub fn markup(html: impl Into<String>) -> Self {
        BodySegment::Markup { html: html.into() }
    }

    /// Image segment.
    pub fn image(url: impl Into<String>, width_hint: Option<u32>) -> Self {
        BodySegment::Image {
            url: url.into(),
            width_hint,
        }
    }

    /// Short kind name used in logs and plan output.
    pub fn kind(&self) -> &'static str {
        match self {
            BodySegment::Text { .. } => "text",
            BodySegment::Markup { .. } => "markup",
            BodySegment::Image { .. } => "image",
        }
    }

    fn digest(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// Content-derived identity of a body segment.
///
/// Two segments at the same position with equal content share a key across
/// rebinds, even though the `Comment` values are distinct allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentKey {
    index: usize,
    digest: u64,
}

impl SegmentKey {
    /// Key for `segment` at body position `index`.
    pub fn of(index: usize, segment: &BodySegment) -> Self {
        Self {
            index,
            digest: segment.digest(),
        }
    }

    /// Body position of the segment.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Where a collapsed preview stops and how tall it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollapseMarker {
    /// Index of the last body segment shown while collapsed.
    pub index: usize,
    /// Height of that segment while collapsed.
    pub preview_height: u32,
}

impl CollapseMarker {
    /// Create a new marker.
    pub fn new(index: usize, preview_height: u32) -> Self {
        Self {
            index,
            preview_height,
        }
    }
}

/// Header fields shown by the details row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDetails {
    /// Comment identity.
    pub id: CommentId,
    /// Author login.
    pub author: String,
    /// Numeric comment id used in permalinks.
    pub number: u64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A single issue/PR comment as delivered by the sync layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    id: CommentId,
    author: String,
    number: u64,
    created_at: DateTime<Utc>,
    #[serde(default)]
    body: Vec<BodySegment>,
    #[serde(default)]
    reactions: ReactionSummary,
    #[serde(default)]
    thread_position: ThreadPosition,
    #[serde(default)]
    collapse: Option<CollapseMarker>,
    #[serde(default)]
    issue: Option<IssueRef>,
}

impl Comment {
    /// Create a comment with an empty body and no reactions.
    pub fn new(
        id: CommentId,
        author: impl Into<String>,
        number: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author: author.into(),
            number,
            created_at,
            body: Vec::new(),
            reactions: ReactionSummary::default(),
            thread_position: ThreadPosition::default(),
            collapse: None,
            issue: None,
        }
    }

    /// Replace the body segments.
    pub fn with_body(mut self, body: Vec<BodySegment>) -> Self {
        self.body = body;
        self
    }

    /// Replace the canonical reaction summary.
    pub fn with_reactions(mut self, reactions: ReactionSummary) -> Self {
        self.reactions = reactions;
        self
    }

    /// Set the thread position.
    pub fn with_thread_position(mut self, position: ThreadPosition) -> Self {
        self.thread_position = position;
        self
    }

    /// Set the collapse marker.
    pub fn with_collapse(mut self, marker: CollapseMarker) -> Self {
        self.collapse = Some(marker);
        self
    }

    /// Set the issue this comment belongs to.
    pub fn with_issue(mut self, issue: IssueRef) -> Self {
        self.issue = Some(issue);
        self
    }

    /// Comment identity (also the reaction subject id).
    pub fn id(&self) -> &CommentId {
        &self.id
    }

    /// Author login.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Numeric comment id.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Ordered body segments.
    pub fn body(&self) -> &[BodySegment] {
        &self.body
    }

    /// Server-confirmed reactions.
    pub fn reactions(&self) -> &ReactionSummary {
        &self.reactions
    }

    /// Position within the visual thread.
    pub fn thread_position(&self) -> ThreadPosition {
        self.thread_position
    }

    /// Collapse marker, if the body has a collapsed preview.
    pub fn collapse(&self) -> Option<CollapseMarker> {
        self.collapse
    }

    /// Owning issue, if known.
    pub fn issue(&self) -> Option<&IssueRef> {
        self.issue.as_ref()
    }

    /// Header fields for the details row.
    pub fn details(&self) -> CommentDetails {
        CommentDetails {
            id: self.id.clone(),
            author: self.author.clone(),
            number: self.number,
            created_at: self.created_at,
        }
    }

    /// Web permalink to this comment, when the owning issue is known.
    pub fn permalink(&self) -> Option<String> {
        self.issue
            .as_ref()
            .map(|issue| format!("{}#issuecomment-{}", issue.url(), self.number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_timestamp() -> DateTime<Utc> {
        "2017-05-19T10:00:00Z".parse().expect("valid timestamp")
    }

    fn make_comment() -> Comment {
        Comment::new(
            CommentId::new("IC_1").expect("valid id"),
            "rnystrom",
            311,
            make_timestamp(),
        )
    }

    #[test]
    fn segment_key_is_content_derived() {
        let a = BodySegment::markup("<p>hi</p>");
        let b = BodySegment::markup("<p>hi</p>");
        let c = BodySegment::markup("<p>bye</p>");
        assert_eq!(SegmentKey::of(0, &a), SegmentKey::of(0, &b));
        assert_ne!(SegmentKey::of(0, &a), SegmentKey::of(0, &c));
        assert_ne!(SegmentKey::of(0, &a), SegmentKey::of(1, &a));
    }

    #[test]
    fn permalink_requires_issue() {
        let comment = make_comment();
        assert_eq!(comment.permalink(), None);

        let comment = comment.with_issue(IssueRef::new("octo", "hello", 42).expect("valid"));
        assert_eq!(
            comment.permalink().as_deref(),
            Some("https://github.com/octo/hello/issues/42#issuecomment-311")
        );
    }

    #[test]
    fn details_copy_header_fields() {
        let details = make_comment().details();
        assert_eq!(details.author, "rnystrom");
        assert_eq!(details.number, 311);
        assert_eq!(details.created_at, make_timestamp());
    }

    #[test]
    fn deserializes_from_json() {
        let json = r#"{
            "id": "IC_9",
            "author": "octocat",
            "number": 9,
            "createdAt": "2017-05-19T10:00:00Z",
            "body": [
                {"kind": "text", "text": "hello"},
                {"kind": "markup", "html": "<table></table>"},
                {"kind": "image", "url": "https://example.com/a.png", "widthHint": 320}
            ],
            "threadPosition": "tail",
            "collapse": {"index": 1, "previewHeight": 200}
        }"#;
        let comment: Comment = serde_json::from_str(json).expect("valid comment json");
        assert_eq!(comment.body().len(), 3);
        assert_eq!(comment.body()[2], BodySegment::image("https://example.com/a.png", Some(320)));
        assert_eq!(comment.thread_position(), ThreadPosition::Tail);
        assert_eq!(comment.collapse(), Some(CollapseMarker::new(1, 200)));
        assert!(comment.reactions().is_empty());
    }
}
