use super::error::TransferError;
use super::filter::{Rejection, UrlFilter};
use super::model::{
    ItemOutcome, MarkAs, NewBookmark, SavedItem, TransferOptions, TransferReport, TRANSFER_TAG,
};
use crate::infrastructure::clients::{BookmarkDestination, ClientError, SavedItemSource};
use async_trait::async_trait;
use std::sync::Arc;

pub struct TransferService {
    source: Arc<dyn SavedItemSource>,
    destination: Arc<dyn BookmarkDestination>,
}

impl TransferService {
    pub fn new(source: Arc<dyn SavedItemSource>, destination: Arc<dyn BookmarkDestination>) -> Self {
        Self {
            source,
            destination,
        }
    }
}

#[async_trait]
pub trait TransferServiceApi: Send + Sync {
    /// Move saved items from the feed reader into the bookmark service
    ///
    /// This operation:
    /// - Fetches every saved item (failure here is fatal)
    /// - Keeps the items whose URL passes the filter, in source order
    /// - In dry-run mode, only reports the surviving items
    /// - Otherwise bookmarks, tags and optionally unsaves/marks read each item in turn
    ///
    /// A failure on one item is logged and never stops the remaining items.
    async fn run(&self, options: &TransferOptions) -> Result<TransferReport, TransferError>;
}

#[async_trait]
impl TransferServiceApi for TransferService {
    async fn run(&self, options: &TransferOptions) -> Result<TransferReport, TransferError> {
        let saved_items = self
            .source
            .get_saved_items()
            .await
            .map_err(TransferError::Source)?;
        tracing::info!("Retrieved {} saved items from FreshRSS", saved_items.len());

        let fetched = saved_items.len();
        let selected = select_items(saved_items, &options.filter);
        tracing::info!(
            "After filtering, {} items remain for processing",
            selected.len()
        );

        let mut report = TransferReport {
            fetched,
            selected: selected.len(),
            dry_run: options.dry_run,
            ..TransferReport::default()
        };

        if options.dry_run {
            tracing::info!("DRY RUN MODE: Would transfer these items:");
            for item in &selected {
                tracing::info!("- {} ({})", item.title, item.url);
            }
            return Ok(report);
        }

        for item in &selected {
            match self.transfer_item(item, options).await {
                Ok(outcome) => {
                    report.transferred += 1;
                    if !outcome.tag_attached {
                        report.tag_failures += 1;
                    }
                }
                Err(e) if e.is_expected() => {
                    report.failed += 1;
                    tracing::error!(url = %item.url, error = %e, "Error processing item");
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::error!(
                        url = %item.url,
                        error = ?e,
                        "Unexpected error processing item"
                    );
                }
            }
        }

        Ok(report)
    }
}

impl TransferService {
    /// Bookmark, tag and (optionally) unsave one item
    ///
    /// Returns an error when the bookmark could not be created or a state change in
    /// the source failed. A tag that did not attach is reported in the outcome only.
    pub async fn transfer_item(
        &self,
        item: &SavedItem,
        options: &TransferOptions,
    ) -> Result<ItemOutcome, ClientError> {
        tracing::info!("Creating bookmark for: {}", item.title);
        let bookmark = self
            .destination
            .create_bookmark(&NewBookmark::link(&item.url, &item.title))
            .await?;

        if !bookmark.has_id() {
            return Err(ClientError::Api(format!(
                "Failed to create bookmark for {}: no bookmark id returned",
                item.url
            )));
        }
        tracing::info!("Created bookmark with ID: {}", bookmark.id);

        let tag_attached = self.attach_transfer_tag(&bookmark.id).await?;

        let mut outcome = ItemOutcome {
            bookmark_id: bookmark.id,
            tag_attached,
            unsaved: false,
            marked_read: false,
        };

        if !options.unsave {
            tracing::info!("Keeping item saved in FreshRSS: {}", item.title);
            return Ok(outcome);
        }

        tracing::info!("Unsaving item from FreshRSS: {}", item.title);
        self.source.set_mark(MarkAs::Unsaved, &item.id).await?;
        outcome.unsaved = true;
        tracing::info!("Successfully unsaved item from FreshRSS: {}", item.title);

        if options.mark_as_read {
            tracing::info!("Marking item as read in FreshRSS: {}", item.title);
            self.source.set_mark(MarkAs::Read, &item.id).await?;
            outcome.marked_read = true;
            tracing::info!("Successfully marked item as read in FreshRSS: {}", item.title);
        }

        Ok(outcome)
    }

    async fn attach_transfer_tag(&self, bookmark_id: &str) -> Result<bool, ClientError> {
        tracing::info!("Adding '{}' tag to bookmark {}", TRANSFER_TAG, bookmark_id);
        let result = self
            .destination
            .attach_tags(bookmark_id, &[TRANSFER_TAG])
            .await?;

        match result.first_tag_id() {
            Some(tag_id) => {
                tracing::info!(
                    "Tag '{}' (ID: {}) attached to bookmark {}",
                    TRANSFER_TAG,
                    tag_id,
                    bookmark_id
                );
                Ok(true)
            }
            None => {
                tracing::warn!("Failed to attach tag to bookmark {}", bookmark_id);
                Ok(false)
            }
        }
    }
}

/// Keep the items whose URL passes the filter, preserving source order
pub fn select_items(items: Vec<SavedItem>, filter: &UrlFilter) -> Vec<SavedItem> {
    items
        .into_iter()
        .filter(|item| match filter.check(&item.url) {
            Ok(()) => true,
            Err(Rejection::NotNeeded) => {
                tracing::debug!("Skipping item (doesn't match needed regex): {}", item.url);
                false
            }
            Err(Rejection::Ignored) => {
                tracing::debug!("Skipping item (matches ignore regex): {}", item.url);
                false
            }
        })
        .collect()
}
