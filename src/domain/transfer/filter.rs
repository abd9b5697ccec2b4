use regex::Regex;

/// Regex filter deciding which saved items are transferred.
///
/// An item survives iff its URL matches `needed` and, when an ignore pattern is
/// configured, does not match `ignore`. Matching is unanchored (search semantics).
#[derive(Debug, Clone)]
pub struct UrlFilter {
    needed: Regex,
    ignore: Option<Regex>,
}

/// Why an item was left out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotNeeded,
    Ignored,
}

impl UrlFilter {
    pub const MATCH_ALL: &'static str = ".*";

    /// Compile both patterns. An empty `ignore` pattern disables exclusion.
    pub fn new(needed: &str, ignore: &str) -> Result<Self, regex::Error> {
        let needed = Regex::new(needed)?;
        let ignore = if ignore.is_empty() {
            None
        } else {
            Some(Regex::new(ignore)?)
        };
        Ok(Self { needed, ignore })
    }

    pub fn check(&self, url: &str) -> Result<(), Rejection> {
        if !self.needed.is_match(url) {
            return Err(Rejection::NotNeeded);
        }
        match &self.ignore {
            Some(ignore) if ignore.is_match(url) => Err(Rejection::Ignored),
            _ => Ok(()),
        }
    }

    pub fn accepts(&self, url: &str) -> bool {
        self.check(url).is_ok()
    }
}
