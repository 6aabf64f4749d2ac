//! Insight counters and analytics queries.

use pressroom_common::models::{InsightKind, InsightQuery, InsightRange};
use pressroom_common::validation::{require, require_str};
use serde_json::Value;

use crate::client::{with_token, ApiClient, Query};
use crate::error::Result;

impl ApiClient {
    /// `POST /insights/stories/{pid}/{sid}/{action}[/{subaction}]`: bump a
    /// story counter (view, share...).
    pub async fn inc_story_insight(
        &self,
        sid: Option<&str>,
        action: Option<&str>,
        subaction: Option<&str>,
    ) -> Result<Value> {
        let sid = require("sid", sid)?;
        let action = require("action", action)?;
        let mut segments = vec!["insights", "stories", self.publisher_id(), sid, action];
        segments.extend(subaction.filter(|s| !s.is_empty()));
        self.execute(self.http.post(self.endpoint(&segments)?)).await
    }

    /// `GET /insights/publishers/{pid}/{action}[/{subaction}]` over a named
    /// period or an explicit `from`/`to` window.
    pub async fn get_publisher_insight(
        &self,
        pid: &str,
        action: &str,
        subaction: Option<&str>,
        range: Option<&InsightRange>,
    ) -> Result<Value> {
        let pid = require_str("pid", pid)?;
        let action = require_str("action", action)?;
        let mut segments = vec!["insights", "publishers", pid, action];
        segments.extend(subaction.filter(|s| !s.is_empty()));

        let query = match range {
            Some(InsightRange::Period(period)) if !period.is_empty() => Query::new().set("period", period),
            Some(InsightRange::Between { from, to }) if !from.is_empty() && !to.is_empty() => {
                Query::new().set("from", from).set("to", to)
            }
            _ => Query::new(),
        };
        let req = self.http.get(self.endpoint(&segments)?).query(&query);
        self.execute(with_token(req, self.session_token().as_deref())).await
    }

    /// `GET /insights/{insight}/{pid}/{kind}/{subaction}` with JSON `filter`
    /// and `sort`, `limit`, and the `current` page cursor.
    pub async fn get_insight(
        &self,
        kind: InsightKind,
        insight: &str,
        subaction: &str,
        query: &InsightQuery,
    ) -> Result<Value> {
        let insight = require_str("insight", insight)?;
        let url = self.endpoint(&["insights", insight, self.publisher_id(), kind.as_str(), subaction])?;
        let params = Query::new()
            .json("filter", query.filter.as_ref())?
            .json("sort", query.sort.as_ref())?
            .opt("limit", query.limit)
            .opt("current", query.current.as_deref());
        let req = self.http.get(url).query(&params);
        self.execute(with_token(req, self.session_token().as_deref())).await
    }

    pub async fn get_view_insight(&self, insight: &str, subaction: &str, query: &InsightQuery) -> Result<Value> {
        self.get_insight(InsightKind::View, insight, subaction, query).await
    }

    pub async fn get_trend_insight(&self, insight: &str, subaction: &str, query: &InsightQuery) -> Result<Value> {
        self.get_insight(InsightKind::Trend, insight, subaction, query).await
    }

    pub async fn get_share_insight(&self, insight: &str, subaction: &str, query: &InsightQuery) -> Result<Value> {
        self.get_insight(InsightKind::Share, insight, subaction, query).await
    }

    pub async fn get_growth_insight(&self, insight: &str, subaction: &str, query: &InsightQuery) -> Result<Value> {
        self.get_insight(InsightKind::Growth, insight, subaction, query).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::extract::{OriginalUri, Query as Params};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;
    use crate::test_support::Backend;

    async fn echo(OriginalUri(uri): OriginalUri, Params(q): Params<HashMap<String, String>>) -> Json<Value> {
        Json(json!({ "path": uri.path(), "query": q }))
    }

    #[tokio::test]
    async fn story_counter_requires_sid_and_action() {
        let backend = Backend::empty().await;
        let client = backend.anonymous_client();

        let err = client.inc_story_insight(None, Some("view"), None).await.unwrap_err();
        assert_eq!(err.missing_field(), Some("sid"));
        let err = client.inc_story_insight(Some("s-1"), None, None).await.unwrap_err();
        assert_eq!(err.missing_field(), Some("action"));
        assert_eq!(backend.hits(), 0);
    }

    #[tokio::test]
    async fn story_counter_path_includes_optional_subaction() {
        let backend = Backend::spawn(
            Router::new()
                .route("/insights/stories/pub-1/{sid}/{action}", post(echo))
                .route("/insights/stories/pub-1/{sid}/{action}/{sub}", post(echo)),
        )
        .await;
        let client = backend.anonymous_client();

        let body = client.inc_story_insight(Some("s-1"), Some("share"), Some("facebook")).await.unwrap();
        assert_eq!(body["path"], "/insights/stories/pub-1/s-1/share/facebook");
        let body = client.inc_story_insight(Some("s-1"), Some("view"), None).await.unwrap();
        assert_eq!(body["path"], "/insights/stories/pub-1/s-1/view");
    }

    #[tokio::test]
    async fn publisher_insight_prefers_period_over_bounds() {
        let backend = Backend::spawn(Router::new().route("/insights/publishers/{pid}/{action}", get(echo))).await;
        let client = backend.anonymous_client();

        let body = client
            .get_publisher_insight("pub-1", "view", None, Some(&InsightRange::Period("7days".into())))
            .await
            .unwrap();
        assert_eq!(body["query"], json!({ "period": "7days" }));

        let range = InsightRange::Between { from: "2024-01-01".into(), to: "2024-01-31".into() };
        let body = client.get_publisher_insight("pub-1", "view", None, Some(&range)).await.unwrap();
        assert_eq!(body["query"], json!({ "from": "2024-01-01", "to": "2024-01-31" }));

        assert!(client.get_publisher_insight("", "view", None, None).await.is_err());
    }

    #[tokio::test]
    async fn insight_listing_keeps_trailing_subaction_slot() {
        let backend = Backend::spawn(
            Router::new()
                .route("/insights/{insight}/pub-1/view/", get(echo))
                .route("/insights/{insight}/pub-1/growth/{sub}", get(echo)),
        )
        .await;
        let client = backend.anonymous_client();

        let query = InsightQuery {
            filter: Some(json!({ "column": "c-1" })),
            sort: Some(json!({ "field": "view", "order": -1 })),
            limit: Some(20),
            current: Some("cursor-2".into()),
        };
        let body = client.get_view_insight("stories", "", &query).await.unwrap();
        assert_eq!(body["path"], "/insights/stories/pub-1/view/");
        assert_eq!(body["query"]["filter"], r#"{"column":"c-1"}"#);
        assert_eq!(body["query"]["sort"], r#"{"field":"view","order":-1}"#);
        assert_eq!(body["query"]["limit"], "20");
        assert_eq!(body["query"]["current"], "cursor-2");

        let body = client.get_growth_insight("columns", "total", &InsightQuery::default()).await.unwrap();
        assert_eq!(body["path"], "/insights/columns/pub-1/growth/total");
        assert_eq!(body["query"], json!({}));
    }
}
