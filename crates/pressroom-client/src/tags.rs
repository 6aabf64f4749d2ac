//! Tags.

use pressroom_common::error::Resource;
use pressroom_common::models::Tag;
use pressroom_common::validation::require_str;
use serde_json::json;

use crate::client::{field, found, with_token, ApiClient};
use crate::error::Result;

impl ApiClient {
    pub async fn get_tags(&self) -> Result<Vec<Tag>> {
        field(self.execute(self.http.get(self.publisher_endpoint(&["tags"])?)).await?, "tags")
    }

    pub async fn get_tag_from_tag_id(&self, tid: &str) -> Result<Tag> {
        let tid = require_str("tid", tid)?;
        field(self.execute(self.http.get(self.publisher_endpoint(&["tags", tid])?)).await?, "tag")
    }

    /// Slug lookup that reports failures as they are, 404 included.
    pub async fn get_tag_from_tag_slug(&self, slug: &str) -> Result<Tag> {
        let slug = require_str("slug", slug)?;
        let url = self.endpoint(&["slugs", "publishers", self.publisher_id(), "tags", slug])?;
        field(self.execute(self.http.get(url)).await?, "tag")
    }

    /// Slug lookup that reports a 404 as the tag not being found.
    pub async fn get_tag_from_slug(&self, slug: &str) -> Result<Tag> {
        let slug = require_str("slug", slug)?;
        let url = self.endpoint(&["slugs", "publishers", self.publisher_id(), "tags", slug])?;
        let body = self
            .execute(self.http.get(url))
            .await
            .map_err(|e| e.not_found_on_404(Resource::Tag))?;
        found(body, "tag", Resource::Tag)
    }

    /// `POST /publishers/{pid}/tags` with `{ tag: { name } }`.
    pub async fn add_tag(&self, name: &str) -> Result<Tag> {
        let name = require_str("name", name)?;
        let req = self
            .http
            .post(self.publisher_endpoint(&["tags"])?)
            .json(&json!({ "tag": { "name": name } }));
        field(self.execute(with_token(req, self.session_token().as_deref())).await?, "tag")
    }

    /// `DELETE /publishers/{pid}/tags/{tid}`. Returns the removed tag when the
    /// backend echoes it.
    pub async fn remove_tag(&self, tid: &str) -> Result<Option<Tag>> {
        let tid = require_str("tid", tid)?;
        let req = self.http.delete(self.publisher_endpoint(&["tags", tid])?);
        field(self.execute(with_token(req, self.session_token().as_deref())).await?, "tag")
    }
}
