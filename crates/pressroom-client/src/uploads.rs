//! Multipart file upload with an optional crop region.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::client::{with_token, ApiClient, Query};
use crate::error::{ApiError, Result};

/// A file ready to be sent.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
    /// Guessed from `name` when unset.
    pub mime: Option<String>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), bytes: bytes.into(), mime: None }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::Config(format!("{} has no file name", path.display())))?
            .to_owned();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(name, bytes))
    }

    fn mime(&self) -> String {
        self.mime.clone().unwrap_or_else(|| {
            mime_guess::from_path(&self.name).first_or_octet_stream().essence_str().to_owned()
        })
    }
}

/// Region of an image to keep, in source pixels. Sent truncated to integers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ApiClient {
    /// `POST {to_url}` with the file as multipart part `field`. `to_url` is a
    /// full URL (upload endpoints differ per media kind). Requires a session.
    pub async fn upload_file(
        &self,
        file: UploadFile,
        field: &str,
        to_url: &str,
        crop: Option<&CropRegion>,
    ) -> Result<Value> {
        let token = self.require_token()?;
        let url = url::Url::parse(to_url).map_err(|e| ApiError::Config(format!("upload URL {to_url:?}: {e}")))?;

        let mime = file.mime();
        let part = Part::bytes(file.bytes).file_name(file.name).mime_str(&mime)?;
        let form = Form::new().part(field.to_owned(), part);

        let mut req = self.http.post(url).multipart(form);
        if let Some(c) = crop {
            let query = Query::new()
                .set("x", c.x.trunc() as i64)
                .set("y", c.y.trunc() as i64)
                .set("w", c.width.trunc() as i64)
                .set("h", c.height.trunc() as i64);
            req = req.query(&query);
        }
        self.execute(with_token(req, Some(&token))).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::extract::{Multipart, Query as Params};
    use axum::http::HeaderMap;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;
    use crate::test_support::{Backend, TOKEN};

    async fn receive(
        headers: HeaderMap,
        Params(q): Params<HashMap<String, String>>,
        mut multipart: Multipart,
    ) -> Json<Value> {
        let mut parts = Vec::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().map(str::to_owned);
            let file_name = field.file_name().map(str::to_owned);
            let content_type = field.content_type().map(str::to_owned);
            let len = field.bytes().await.unwrap().len();
            parts.push(json!({ "name": name, "file": file_name, "type": content_type, "len": len }));
        }
        Json(json!({
            "token": headers.get("x-access-token").and_then(|v| v.to_str().ok()),
            "query": q,
            "parts": parts,
        }))
    }

    #[tokio::test]
    async fn upload_sends_part_and_crop() {
        let backend = Backend::spawn(Router::new().route("/upload/image", post(receive))).await;
        let client = backend.signed_in_client();

        let crop = CropRegion { x: 10.7, y: 0.0, width: 300.2, height: 200.9 };
        let body = client
            .upload_file(
                UploadFile::new("cover.png", vec![1u8, 2, 3]),
                "image",
                &format!("{}/upload/image", backend.url),
                Some(&crop),
            )
            .await
            .unwrap();

        assert_eq!(body["token"], TOKEN);
        assert_eq!(body["query"], json!({ "x": "10", "y": "0", "w": "300", "h": "200" }));
        assert_eq!(body["parts"], json!([{ "name": "image", "file": "cover.png", "type": "image/png", "len": 3 }]));
    }

    #[tokio::test]
    async fn upload_without_session_is_refused_locally() {
        let backend = Backend::empty().await;
        let err = backend
            .anonymous_client()
            .upload_file(UploadFile::new("a.txt", "hi"), "file", &format!("{}/upload", backend.url), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(backend.hits(), 0);
    }
}
