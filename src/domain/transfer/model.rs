use serde::{Deserialize, Serialize};
use std::fmt;

use super::filter::UrlFilter;

/// Name of the tag attached to every bookmark created by a transfer
pub const TRANSFER_TAG: &str = "freshrss";

/// A feed entry the user flagged for later reading in FreshRSS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItem {
    pub id: String,
    pub url: String,
    pub title: String,
}

/// Bookmark creation request sent to Karakeep
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBookmark {
    #[serde(rename = "type")]
    pub kind: BookmarkKind,
    pub url: String,
    pub title: String,
}

impl NewBookmark {
    pub fn link(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: BookmarkKind::Link,
            url: url.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkKind {
    Link,
}

/// Bookmark as returned by Karakeep.
///
/// An empty `id` means the destination accepted the request but did not hand back an
/// identifier; the runner treats that as a failed creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Bookmark {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<BookmarkTag>,
}

impl Bookmark {
    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookmarkTag {
    pub id: String,
    pub name: String,
}

/// Outcome of a tag attach call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachTagsResult {
    pub attached_tag_ids: Vec<String>,
}

impl AttachTagsResult {
    pub fn first_tag_id(&self) -> Option<&str> {
        self.attached_tag_ids.first().map(String::as_str)
    }
}

/// State transitions the runner requests from FreshRSS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkAs {
    Unsaved,
    Read,
}

impl MarkAs {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkAs::Unsaved => "unsaved",
            MarkAs::Read => "read",
        }
    }
}

impl fmt::Display for MarkAs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a single run needs to know, resolved from the command line
#[derive(Debug, Clone)]
pub struct TransferOptions {
    pub filter: UrlFilter,
    pub dry_run: bool,
    pub unsave: bool,
    pub mark_as_read: bool,
}

/// What happened to one transferred item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub bookmark_id: String,
    pub tag_attached: bool,
    pub unsaved: bool,
    pub marked_read: bool,
}

/// Summary of a run, logged on completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReport {
    pub fetched: usize,
    pub selected: usize,
    pub dry_run: bool,
    pub transferred: usize,
    pub tag_failures: usize,
    pub failed: usize,
}
