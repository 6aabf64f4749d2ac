//! Stories and the feed query that lists them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Extra;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// 0 = draft, 1 = published, 2 = unlisted, 3 = scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,

    /// Column id, or the embedded column document on reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<Value>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// `GET /stories/{sid}` answers with the story plus, when a token was given,
/// whether the caller may edit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryEnvelope {
    pub story: Story,
    #[serde(default)]
    pub can_edit_story: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Feed listing flags, sent as a JSON string in the `option` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedOption {
    /// Include stories that do not belong to any column.
    pub allow_unlisted: bool,
    /// Only stories the signed-in user's roles may see. Attaches the session
    /// token to the request.
    pub only_authorized: bool,
}

/// Parameters of `GET /publishers/{pid}/feed`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedQuery {
    /// `story`, `news`, `article`, `video`, `qa`...
    pub kind: String,
    pub filter: Option<Value>,
    /// `latest`, `popular` or `trending`.
    pub sort: Option<String>,
    pub sort_by: Option<String>,
    pub page: u32,
    pub limit: u32,
    pub option: Option<FeedOption>,
}

impl FeedQuery {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            filter: None,
            sort: None,
            sort_by: None,
            page: 0,
            limit: 15,
            option: None,
        }
    }

    pub fn filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    pub fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    pub fn option(mut self, option: FeedOption) -> Self {
        self.option = Some(option);
        self
    }

    pub fn only_authorized(&self) -> bool {
        self.option.is_some_and(|o| o.only_authorized)
    }
}
