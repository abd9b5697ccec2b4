use crate::domain::transfer::{MarkAs, SavedItem};
use async_trait::async_trait;

use super::ClientError;

/// Feed reader holding the user's saved items.
/// Implemented by the FreshRSS Fever client; faked in tests.
#[async_trait]
pub trait SavedItemSource: Send + Sync {
    /// Every item currently flagged as saved
    async fn get_saved_items(&self) -> Result<Vec<SavedItem>, ClientError>;

    /// Change the saved/read state of one item
    async fn set_mark(&self, mark: MarkAs, item_id: &str) -> Result<(), ClientError>;
}
