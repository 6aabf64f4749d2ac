//! Stories: reads, feed listing, CRUD, and status transitions.

use pressroom_common::error::Resource;
use pressroom_common::models::{FeedQuery, Story, StoryEnvelope, Tag};
use pressroom_common::validation::require_str;
use serde_json::{json, Value};

use crate::client::{field, with_token, ApiClient, Query};
use crate::error::{ApiError, Result};

impl ApiClient {
    /// `GET /stories/{sid}?token=&countView=`.
    ///
    /// Pass `token` to learn whether the caller may edit the story; the flag
    /// defaults to `false`. No `sid` means no story. A 404 is reported as the
    /// story not being found; other failures propagate.
    pub async fn get_story_from_sid(
        &self,
        sid: Option<&str>,
        token: Option<&str>,
        count_view: Option<bool>,
    ) -> Result<StoryEnvelope> {
        let sid = sid
            .filter(|s| !s.is_empty())
            .ok_or(ApiError::NotFound { resource: Resource::Story })?;
        let query = Query::new().opt("token", token).opt("countView", count_view);
        let body = self
            .execute(self.http.get(self.endpoint(&["stories", sid])?).query(&query))
            .await
            .map_err(|e| e.not_found_on_404(Resource::Story))?;
        if body.get("story").is_none_or(Value::is_null) {
            return Err(ApiError::NotFound { resource: Resource::Story });
        }
        Ok(serde_json::from_value(body)?)
    }

    /// `POST /stories/{pid}/find?page=&limit=`: published stories whose title
    /// matches `keyword`.
    pub async fn get_story_from_keyword(
        &self,
        keyword: &str,
        kind: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<Value> {
        let query = Query::new().set("page", page).set("limit", limit);
        let req = self
            .http
            .post(self.endpoint(&["stories", self.publisher_id(), "find"])?)
            .query(&query)
            .json(&json!({ "title": keyword, "status": 1, "type": kind }));
        self.execute(req).await
    }

    /// `GET /stories/getfocusword/{word}`
    pub async fn get_focus_word_detail(&self, focus_word: &str) -> Result<Value> {
        let focus_word = require_str("focusWord", focus_word)?;
        self.execute(self.http.get(self.endpoint(&["stories", "getfocusword", focus_word])?))
            .await
    }

    /// `GET /publishers/{pid}/feed`. The session token is attached only when
    /// the query asks for authorized stories.
    pub async fn get_feed(&self, feed: &FeedQuery) -> Result<Value> {
        let query = Query::new()
            .set("type", &feed.kind)
            .json("filter", feed.filter.as_ref())?
            .json("option", feed.option.as_ref())?
            .opt("sort", feed.sort.as_deref())
            .opt("sortby", feed.sort_by.as_deref())
            .set("page", feed.page)
            .set("limit", feed.limit);
        let token = if feed.only_authorized() { self.session_token() } else { None };
        let req = self.http.get(self.publisher_endpoint(&["feed"])?).query(&query);
        self.execute(with_token(req, token.as_deref())).await
    }

    /// `POST /stories` with `{ story }`.
    pub async fn create_story(&self, story: &Story) -> Result<Story> {
        let req = self.http.post(self.endpoint(&["stories"])?).json(&json!({ "story": story }));
        field(self.execute(with_token(req, self.session_token().as_deref())).await?, "story")
    }

    /// `PATCH /stories/{sid}` with `{ story }`.
    pub async fn update_story(&self, sid: &str, story: &Story) -> Result<Story> {
        let sid = require_str("sid", sid)?;
        let req = self.http.patch(self.endpoint(&["stories", sid])?).json(&json!({ "story": story }));
        field(self.execute(with_token(req, self.session_token().as_deref())).await?, "story")
    }

    /// `DELETE /stories/{sid}`. Requires a session.
    pub async fn delete_story(&self, sid: &str) -> Result<Value> {
        let token = self.require_token()?;
        let sid = require_str("sid", sid)?;
        let req = self.http.delete(self.endpoint(&["stories", sid])?);
        self.execute(with_token(req, Some(&token))).await
    }

    /// `PATCH /stories/{sid}?token=` with `{ story: { status } }`. Requires a
    /// session; the token travels in the query string.
    pub async fn set_story_status(&self, sid: &str, status: i32) -> Result<Value> {
        let token = self.require_token()?;
        let sid = require_str("sid", sid)?;
        let req = self
            .http
            .patch(self.endpoint(&["stories", sid])?)
            .query(&Query::new().set("token", token))
            .json(&json!({ "story": { "status": status } }));
        self.execute(req).await
    }

    /// `GET /stories/{sid}/tags`
    pub async fn get_story_tags(&self, sid: &str) -> Result<Vec<Tag>> {
        let sid = require_str("sid", sid)?;
        field(self.execute(self.http.get(self.endpoint(&["stories", sid, "tags"])?)).await?, "tags")
    }

    /// `POST /stories/find` with `{ title, sort }`.
    pub async fn filter_story_by_title(&self, title: &str, sort: Option<&str>) -> Result<Vec<Story>> {
        let req = self
            .http
            .post(self.endpoint(&["stories", "find"])?)
            .json(&json!({ "title": title, "sort": sort }));
        field(self.execute(req).await?, "stories")
    }

    /// `POST /checkurl/stories` with `{ oldUrl }`: resolves a URL from the
    /// previous site to its story.
    pub async fn check_old_url(&self, old_url: &str) -> Result<Value> {
        let req = self
            .http
            .post(self.endpoint(&["checkurl", "stories"])?)
            .json(&json!({ "oldUrl": old_url }));
        self.execute(req).await
    }
}
