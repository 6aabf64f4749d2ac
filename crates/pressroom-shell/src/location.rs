//! Browser-style locations.

use std::fmt;

/// One history entry. `search` and `hash` keep their leading `?` / `#` (or are
/// empty), the way a browser reports them. `key` is `None` for an entry the
/// page was loaded on, and set for entries created by in-app navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    pub search: String,
    pub hash: String,
    pub key: Option<String>,
}

/// How the current entry was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Push,
    Replace,
    Pop,
}

impl Location {
    /// Split `/path?query#fragment`. A missing path becomes `/`.
    pub fn parse(href: &str) -> Self {
        let (rest, hash) = match href.find('#') {
            Some(i) => href.split_at(i),
            None => (href, ""),
        };
        let (pathname, search) = match rest.find('?') {
            Some(i) => rest.split_at(i),
            None => (rest, ""),
        };
        Self {
            pathname: if pathname.is_empty() { "/".into() } else { pathname.into() },
            search: if search == "?" { String::new() } else { search.into() },
            hash: if hash == "#" { String::new() } else { hash.into() },
            key: None,
        }
    }

    /// The fragment without its `#`, if there is one.
    pub fn fragment(&self) -> Option<&str> {
        self.hash.strip_prefix('#').filter(|f| !f.is_empty())
    }

    /// Same page: path and query match. The fragment is ignored.
    pub fn same_page(&self, other: &Location) -> bool {
        self.pathname == other.pathname && self.search == other.search
    }

    /// This location with its fragment set to `#{fragment}`.
    pub fn with_fragment(&self, fragment: &str) -> Self {
        Self { hash: format!("#{fragment}"), ..self.clone() }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}
