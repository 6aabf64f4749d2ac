//! Insight (analytics) query descriptors.

use serde_json::Value;

/// The four insight families served under `/insights/{insight}/{pid}/...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    View,
    Trend,
    Share,
    Growth,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Trend => "trend",
            Self::Share => "share",
            Self::Growth => "growth",
        }
    }
}

/// Filter, sort, and pagination cursor for an insight listing. `filter` and
/// `sort` travel as JSON strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightQuery {
    pub filter: Option<Value>,
    pub sort: Option<Value>,
    pub limit: Option<u32>,
    /// Opaque cursor returned by the previous page.
    pub current: Option<String>,
}

/// Time window of a publisher insight. A named period wins over explicit bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightRange {
    Period(String),
    Between { from: String, to: String },
}
