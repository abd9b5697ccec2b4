pub mod bookmark_destination;
pub mod error;
pub mod freshrss;
pub mod karakeep;
pub mod saved_item_source;

pub use bookmark_destination::BookmarkDestination;
pub use error::ClientError;
pub use freshrss::FreshRssClient;
pub use karakeep::KarakeepClient;
pub use saved_item_source::SavedItemSource;
