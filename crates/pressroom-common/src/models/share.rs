//! Link sharing: UTM tagging and shortener results.

use serde::{Deserialize, Serialize};
use url::Url;

/// Campaign parameters appended to shared links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utm {
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub content: Option<String>,
}

impl Utm {
    fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("utm_source", self.source.as_deref()),
            ("utm_medium", self.medium.as_deref()),
            ("utm_campaign", self.campaign.as_deref()),
            ("utm_content", self.content.as_deref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.filter(|v| !v.is_empty()).map(|v| (k, v)))
        .collect()
    }

    /// Return `url` with the UTM parameters set, replacing any existing ones of
    /// the same name. Unparseable URLs are returned untouched.
    pub fn append_to(&self, url: &str) -> String {
        let pairs = self.pairs();
        let Ok(mut parsed) = Url::parse(url) else {
            return url.to_owned();
        };
        if pairs.is_empty() {
            return url.to_owned();
        }

        let kept: Vec<(String, String)> = parsed
            .query_pairs()
            .filter(|(k, _)| !pairs.iter().any(|(p, _)| p == k))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        parsed.query_pairs_mut().clear().extend_pairs(kept).extend_pairs(pairs);
        parsed.into()
    }
}

/// Outcome of a shortening attempt. `success == false` means `url` is the
/// long URL, already UTM-tagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenResult {
    pub success: bool,
    pub url: String,
}
