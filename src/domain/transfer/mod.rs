pub mod error;
pub mod filter;
pub mod model;
pub mod service;

pub use error::TransferError;
pub use filter::{Rejection, UrlFilter};
pub use model::{
    AttachTagsResult, Bookmark, BookmarkKind, BookmarkTag, ItemOutcome, MarkAs, NewBookmark,
    SavedItem, TransferOptions, TransferReport, TRANSFER_TAG,
};
pub use service::{TransferService, TransferServiceApi};
