//! Attribution hash registration and lookup.

use pressroom_common::models::{HashRecord, NewHash};
use pressroom_common::validation::require_str;

use crate::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// `POST /publishers/{pid}/hashes` with `{ hash, story }`. `sid` is `None`
    /// when the page is not a story. The body is the record itself.
    pub async fn create_hash(&self, hash: &str, sid: Option<&str>) -> Result<HashRecord> {
        let hash = require_str("hash", hash)?;
        let body = NewHash {
            hash: hash.to_owned(),
            story: sid.filter(|s| !s.is_empty()).map(str::to_owned),
        };
        let req = self.http.post(self.publisher_endpoint(&["hashes"])?).json(&body);
        Ok(serde_json::from_value(self.execute(req).await?)?)
    }

    /// `GET /publishers/{pid}/hashes/{hash}`
    pub async fn check_hash(&self, hash: &str) -> Result<HashRecord> {
        let hash = require_str("hash", hash)?;
        let body = self.execute(self.http.get(self.publisher_endpoint(&["hashes", hash])?)).await?;
        Ok(serde_json::from_value(body)?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::error::ApiError;
    use crate::test_support::Backend;

    type Store = Arc<Mutex<HashMap<String, Value>>>;

    fn hash_routes() -> Router {
        let store: Store = Arc::default();
        Router::new()
            .route(
                "/publishers/pub-1/hashes",
                post(|State(store): State<Store>, Json(body): Json<Value>| async move {
                    let hash = body["hash"].as_str().unwrap_or_default().to_owned();
                    let record = json!({ "hash": hash, "story": body["story"] });
                    store.lock().unwrap().insert(hash, record.clone());
                    Json(record)
                }),
            )
            .route(
                "/publishers/pub-1/hashes/{hash}",
                get(|State(store): State<Store>, Path(hash): Path<String>| async move {
                    match store.lock().unwrap().get(&hash) {
                        Some(record) => Json(record.clone()).into_response(),
                        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "hash not found" }))).into_response(),
                    }
                }),
            )
            .with_state(store)
    }

    #[tokio::test]
    async fn created_hash_checks_back_to_its_story() {
        let backend = Backend::spawn(hash_routes()).await;
        let client = backend.anonymous_client();

        let created = client.create_hash("k3x9a1", Some("5a1b2c3d4e5f6a7b8c9d0e1f")).await.unwrap();
        assert_eq!(created.hash.as_deref(), Some("k3x9a1"));

        let checked = client.check_hash("k3x9a1").await.unwrap();
        assert_eq!(checked.hash.as_deref(), Some("k3x9a1"));
        assert_eq!(checked.story_id(), Some("5a1b2c3d4e5f6a7b8c9d0e1f"));
    }

    #[tokio::test]
    async fn hash_without_story_and_unknown_hash() {
        let backend = Backend::spawn(hash_routes()).await;
        let client = backend.anonymous_client();

        let created = client.create_hash("abc", None).await.unwrap();
        assert_eq!(created.story_id(), None);

        match client.check_hash("nope").await.unwrap_err() {
            ApiError::Server { status, payload } => {
                assert_eq!(status, 404);
                assert_eq!(payload, json!("hash not found"));
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_hash_is_rejected_locally() {
        let backend = Backend::empty().await;
        let client = backend.anonymous_client();
        assert_eq!(client.create_hash("", Some("s")).await.unwrap_err().missing_field(), Some("hash"));
        assert_eq!(client.check_hash(" ").await.unwrap_err().missing_field(), Some("hash"));
        assert_eq!(backend.hits(), 0);
    }
}
