//! Publisher columns and their editor/writer membership.

use pressroom_common::error::Resource;
use pressroom_common::models::{Column, User};
use pressroom_common::validation::{require_str, strip_query};
use serde_json::{json, Value};

use crate::client::{field, found, with_token, ApiClient, Query};
use crate::error::Result;

impl ApiClient {
    /// `GET /publishers/{pid}/columns`
    pub async fn get_publisher_columns(&self) -> Result<Vec<Column>> {
        let body = self.execute(self.http.get(self.publisher_endpoint(&["columns"])?)).await?;
        field(body, "columns")
    }

    /// `GET /publishers/{pid}/columns?status=`. The backend lists published
    /// columns (status 1) unless told otherwise.
    pub async fn get_columns(&self, status: i32) -> Result<Vec<Column>> {
        let query = Query::new().set("status", status);
        let body = self.execute(self.http.get(self.publisher_endpoint(&["columns"])?).query(&query)).await?;
        field(body, "columns")
    }

    /// `GET /slugs/publishers/{pid}/columns/{slug}`. A trailing `?query` on the
    /// slug is ignored.
    pub async fn get_column_from_slug(&self, slug: &str) -> Result<Column> {
        let url = self.endpoint(&["slugs", "publishers", self.publisher_id(), "columns", strip_query(slug)])?;
        let body = self
            .execute(self.http.get(url))
            .await
            .map_err(|e| e.not_found_on_404(Resource::Column))?;
        found(body, "column", Resource::Column)
    }

    /// `GET /publishers/{pid}/columns/{cid}`. `token` is optional.
    pub async fn get_column(&self, cid: &str, token: Option<&str>) -> Result<Column> {
        let cid = require_str("cid", cid)?;
        let req = self.http.get(self.publisher_endpoint(&["columns", cid])?);
        field(self.execute(with_token(req, token)).await?, "column")
    }

    /// `POST /publishers/{pid}/columns` with `{ column }`.
    pub async fn new_column(&self, column: &Column) -> Result<Column> {
        let req = self
            .http
            .post(self.publisher_endpoint(&["columns"])?)
            .json(&json!({ "column": column }));
        field(self.execute(with_token(req, self.session_token().as_deref())).await?, "column")
    }

    /// `PATCH /publishers/{pid}/columns/{cid}` with `{ column }`.
    pub async fn update_column(&self, cid: &str, column: &Column) -> Result<Column> {
        let cid = require_str("cid", cid)?;
        let req = self
            .http
            .patch(self.publisher_endpoint(&["columns", cid])?)
            .json(&json!({ "column": column }));
        field(self.execute(with_token(req, self.session_token().as_deref())).await?, "column")
    }

    /// `DELETE /publishers/{pid}/columns/{cid}`
    pub async fn remove_column(&self, cid: &str) -> Result<Value> {
        let cid = require_str("cid", cid)?;
        let req = self.http.delete(self.publisher_endpoint(&["columns", cid])?);
        self.execute(with_token(req, self.session_token().as_deref())).await
    }

    /// Content types are served alongside the column list.
    pub async fn get_content_types(&self) -> Result<Value> {
        let body = self.execute(self.http.get(self.publisher_endpoint(&["columns"])?)).await?;
        field(body, "contentTypes")
    }

    /// `GET /publishers/{pid}/columns/parent`: top-level columns.
    pub async fn get_children(&self) -> Result<Vec<Column>> {
        let body = self.execute(self.http.get(self.publisher_endpoint(&["columns", "parent"])?)).await?;
        field(body, "columns")
    }

    /// `GET /publishers/{pid}/columns/{parent}/parent`: children of `parent`.
    pub async fn get_children_from_parent(&self, parent: &str) -> Result<Vec<Column>> {
        let parent = require_str("parent", parent)?;
        let body = self
            .execute(self.http.get(self.publisher_endpoint(&["columns", parent, "parent"])?))
            .await?;
        field(body, "columns")
    }

    // ── Membership ────────────────────────────────────────────────────────────

    pub async fn get_editors(&self, cid: &str) -> Result<Vec<User>> {
        self.members(cid, "editors").await
    }

    pub async fn add_editor_to_column(&self, uid: &str, cid: &str) -> Result<Value> {
        self.add_member(uid, cid, "editors").await
    }

    pub async fn remove_editor(&self, editor_id: &str, cid: &str) -> Result<Value> {
        self.remove_member(editor_id, cid, "editors").await
    }

    pub async fn get_column_writers(&self, cid: &str) -> Result<Vec<User>> {
        self.members(cid, "writers").await
    }

    pub async fn add_writer_to_column(&self, uid: &str, cid: &str) -> Result<Value> {
        self.add_member(uid, cid, "writers").await
    }

    pub async fn remove_writer(&self, writer_id: &str, cid: &str) -> Result<Value> {
        self.remove_member(writer_id, cid, "writers").await
    }

    /// `GET /publishers/{pid}/columns/{cid}/{role}`
    async fn members(&self, cid: &str, role: &'static str) -> Result<Vec<User>> {
        let cid = require_str("cid", cid)?;
        let body = self.execute(self.http.get(self.publisher_endpoint(&["columns", cid, role])?)).await?;
        field(body, role)
    }

    /// `POST /publishers/{pid}/columns/{cid}/{role}/{uid}`. Token first, then ids.
    async fn add_member(&self, uid: &str, cid: &str, role: &'static str) -> Result<Value> {
        let token = self.require_token()?;
        let uid = require_str("uid", uid)?;
        let cid = require_str("cid", cid)?;
        let req = self.http.post(self.publisher_endpoint(&["columns", cid, role, uid])?);
        self.execute(with_token(req, Some(&token))).await
    }

    /// `DELETE /publishers/{pid}/columns/{cid}/{role}/{uid}`
    async fn remove_member(&self, uid: &str, cid: &str, role: &'static str) -> Result<Value> {
        let uid = require_str("uid", uid)?;
        let cid = require_str("cid", cid)?;
        let req = self.http.delete(self.publisher_endpoint(&["columns", cid, role, uid])?);
        self.execute(with_token(req, self.session_token().as_deref())).await
    }
}
