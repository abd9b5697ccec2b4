use structopt::StructOpt;

use crate::domain::transfer::{TransferOptions, UrlFilter};

/// Transfer saved items from FreshRSS to Karakeep.
///
/// Fetches saved items from FreshRSS, filters them by URL, adds them as bookmarks to
/// Karakeep with the tag 'freshrss', then optionally unsaves them in FreshRSS
/// (--unsave-freshrss). Unsaved items can also be marked as read (--mark-as-read).
#[derive(Debug, StructOpt)]
#[structopt(name = "freshrss-to-karakeep")]
pub struct Args {
    /// Only include items with URLs matching this regex
    #[structopt(long = "needed-regex", default_value = ".*")]
    pub needed_regex: String,

    /// Exclude items with URLs matching this regex
    #[structopt(long = "ignore-regex", default_value = "")]
    pub ignore_regex: String,

    /// Don't actually transfer items, just show what would be transferred
    #[structopt(long = "dry-run")]
    pub dry_run: bool,

    /// Unsave items from FreshRSS after transfer (default)
    #[structopt(
        name = "unsave-freshrss",
        long = "unsave-freshrss",
        overrides_with = "no-unsave-freshrss"
    )]
    unsave_freshrss: bool,

    /// Keep items saved in FreshRSS after transfer
    #[structopt(
        name = "no-unsave-freshrss",
        long = "no-unsave-freshrss",
        overrides_with = "unsave-freshrss"
    )]
    no_unsave_freshrss: bool,

    /// Show detailed log messages in console output
    #[structopt(long = "verbose")]
    pub verbose: bool,

    /// Mark items as read in FreshRSS after transfer (default, only if unsaved)
    #[structopt(
        name = "mark-as-read",
        long = "mark-as-read",
        overrides_with = "no-mark-as-read"
    )]
    mark_as_read: bool,

    /// Leave items unread in FreshRSS after transfer
    #[structopt(
        name = "no-mark-as-read",
        long = "no-mark-as-read",
        overrides_with = "mark-as-read"
    )]
    no_mark_as_read: bool,
}

impl Args {
    /// Both flags of a pair override each other, so at most one is set
    pub fn unsave_freshrss(&self) -> bool {
        self.unsave_freshrss || !self.no_unsave_freshrss
    }

    pub fn mark_as_read(&self) -> bool {
        self.mark_as_read || !self.no_mark_as_read
    }

    pub fn transfer_options(&self) -> Result<TransferOptions, regex::Error> {
        Ok(TransferOptions {
            filter: UrlFilter::new(&self.needed_regex, &self.ignore_regex)?,
            dry_run: self.dry_run,
            unsave: self.unsave_freshrss(),
            mark_as_read: self.mark_as_read(),
        })
    }
}
