//! Core identifier newtypes with smart constructors.
//!
//! All identifiers validate their input at construction time.
//! Raw constructors are never exported - use smart constructors only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node identifier of a comment, also used as the reaction subject id.
/// NEVER export the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentId(String);

impl CommentId {
    /// Smart constructor: validates non-empty id
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidCommentId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidCommentId::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CommentId {
    type Error = InvalidCommentId;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<CommentId> for String {
    fn from(id: CommentId) -> Self {
        id.0
    }
}

/// Reference to an issue or pull request: `owner/repo#number`.
///
/// Used both for the comment permalink and for cross-reference navigation
/// out of body content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IssueRefFields")]
pub struct IssueRef {
    owner: String,
    repo: String,
    number: u64,
}

// unvalidated wire shape of IssueRef
#[derive(Deserialize)]
struct IssueRefFields {
    owner: String,
    repo: String,
    number: u64,
}

impl TryFrom<IssueRefFields> for IssueRef {
    type Error = InvalidIssueRef;

    fn try_from(fields: IssueRefFields) -> Result<Self, Self::Error> {
        Self::new(fields.owner, fields.repo, fields.number)
    }
}

impl IssueRef {
    /// Smart constructor: owner and repo must be non-empty and slash-free,
    /// number must be positive.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        number: u64,
    ) -> Result<Self, InvalidIssueRef> {
        let owner = owner.into();
        let repo = repo.into();
        if owner.is_empty() || owner.contains('/') {
            return Err(InvalidIssueRef::Owner(owner));
        }
        if repo.is_empty() || repo.contains('/') {
            return Err(InvalidIssueRef::Repo(repo));
        }
        if number == 0 {
            return Err(InvalidIssueRef::Number);
        }
        Ok(Self {
            owner,
            repo,
            number,
        })
    }

    /// Parse the `owner/repo#number` shorthand.
    pub fn parse(raw: &str) -> Result<Self, InvalidIssueRef> {
        let (slug, number) = raw
            .split_once('#')
            .ok_or_else(|| InvalidIssueRef::Format(raw.to_string()))?;
        let (owner, repo) = slug
            .split_once('/')
            .ok_or_else(|| InvalidIssueRef::Format(raw.to_string()))?;
        let number = number
            .parse::<u64>()
            .map_err(|_| InvalidIssueRef::Format(raw.to_string()))?;
        Self::new(owner, repo, number)
    }

    /// Repository owner login.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Issue or pull request number.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Web URL of the issue.
    pub fn url(&self) -> String {
        format!(
            "https://github.com/{}/{}/issues/{}",
            self.owner, self.repo, self.number
        )
    }
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

// ===== Error Types =====

/// Rejected comment id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCommentId {
    /// The id was the empty string.
    #[error("Comment ID cannot be empty")]
    Empty,
}

/// Rejected issue reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidIssueRef {
    /// Input did not match `owner/repo#number`.
    #[error("Expected owner/repo#number, got {0:?}")]
    Format(String),
    /// Owner was empty or contained a slash.
    #[error("Invalid repository owner: {0:?}")]
    Owner(String),
    /// Repo was empty or contained a slash.
    #[error("Invalid repository name: {0:?}")]
    Repo(String),
    /// Issue numbers start at 1.
    #[error("Issue number must be positive")]
    Number,
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    // ===== CommentId Tests =====

    #[test]
    fn comment_id_accepts_node_id() {
        let id = CommentId::new("MDEyOklzc3VlQ29tbWVudDMxMjM0NTY3OA==");
        assert!(id.is_ok(), "Valid node id should be accepted");
    }

    #[test]
    fn comment_id_rejects_empty_string() {
        let id = CommentId::new("");
        assert!(
            matches!(id, Err(InvalidCommentId::Empty)),
            "Empty string should return InvalidCommentId::Empty"
        );
    }

    #[test]
    fn comment_id_display_returns_inner_string() {
        let id = CommentId::new("IC_kwDO").expect("valid id");
        assert_eq!(id.to_string(), "IC_kwDO");
        assert_eq!(id.as_str(), "IC_kwDO");
    }

    #[test]
    fn comment_id_deserialize_rejects_empty() {
        let result: Result<CommentId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err(), "Empty id must not deserialize");

        let id: CommentId = serde_json::from_str("\"IC_1\"").expect("valid json id");
        assert_eq!(id.as_str(), "IC_1");
    }

    // ===== IssueRef Tests =====

    #[test]
    fn issue_ref_parses_shorthand() {
        let issue = IssueRef::parse("rnystrom/GitHawk#1201").expect("valid shorthand");
        assert_eq!(issue.owner(), "rnystrom");
        assert_eq!(issue.repo(), "GitHawk");
        assert_eq!(issue.number(), 1201);
        assert_eq!(issue.to_string(), "rnystrom/GitHawk#1201");
    }

    #[test]
    fn issue_ref_deserialize_validates_fields() {
        let issue: IssueRef =
            serde_json::from_str(r#"{"owner":"octo","repo":"hello","number":7}"#)
                .expect("valid issue json");
        assert_eq!(issue, IssueRef::new("octo", "hello", 7).expect("valid ref"));

        for json in [
            r#"{"owner":"","repo":"hello","number":7}"#,
            r#"{"owner":"oc/to","repo":"hello","number":7}"#,
            r#"{"owner":"octo","repo":"he/llo","number":7}"#,
            r#"{"owner":"octo","repo":"hello","number":0}"#,
        ] {
            let result: Result<IssueRef, _> = serde_json::from_str(json);
            assert!(result.is_err(), "{json} must not deserialize");
        }
    }

    #[test]
    fn issue_ref_url_points_at_issue_page() {
        let issue = IssueRef::new("octo", "hello", 7).expect("valid ref");
        assert_eq!(issue.url(), "https://github.com/octo/hello/issues/7");
    }

    #[test]
    fn issue_ref_rejects_malformed_input() {
        assert!(matches!(
            IssueRef::parse("octo/hello"),
            Err(InvalidIssueRef::Format(_))
        ));
        assert!(matches!(
            IssueRef::parse("octohello#3"),
            Err(InvalidIssueRef::Format(_))
        ));
        assert!(matches!(
            IssueRef::parse("octo/hello#abc"),
            Err(InvalidIssueRef::Format(_))
        ));
        assert!(matches!(
            IssueRef::parse("/hello#3"),
            Err(InvalidIssueRef::Owner(_))
        ));
        assert!(matches!(
            IssueRef::parse("octo/#3"),
            Err(InvalidIssueRef::Repo(_))
        ));
        assert!(matches!(
            IssueRef::parse("octo/hello#0"),
            Err(InvalidIssueRef::Number)
        ));
    }
}
