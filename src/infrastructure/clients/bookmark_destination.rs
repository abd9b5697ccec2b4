use crate::domain::transfer::{AttachTagsResult, Bookmark, NewBookmark};
use async_trait::async_trait;

use super::ClientError;

/// Bookmarking service receiving transferred items
#[async_trait]
pub trait BookmarkDestination: Send + Sync {
    /// Create a bookmark and return it as stored
    async fn create_bookmark(&self, bookmark: &NewBookmark) -> Result<Bookmark, ClientError>;

    /// Attach tags (by name) to an existing bookmark
    ///
    /// # Errors
    /// Returns error if the call itself fails. A call that succeeds but attaches
    /// nothing is reported through an empty `AttachTagsResult`, not an error.
    async fn attach_tags(
        &self,
        bookmark_id: &str,
        tag_names: &[&str],
    ) -> Result<AttachTagsResult, ClientError>;
}
