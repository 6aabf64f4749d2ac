//! Best-effort link shortening through Bitly.

use pressroom_common::models::{ShortenResult, Utm};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{ApiClient, Query};
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct BitlyResponse {
    status_code: Option<i64>,
    #[serde(default)]
    status_txt: Option<String>,
    /// An object on success; Bitly sends `[]` on failure.
    #[serde(default)]
    data: Value,
}

impl ApiClient {
    /// Tag `url` with `utm` and shorten it.
    ///
    /// Never fails: anything short of a `status_code` of 200 from the
    /// shortener yields `success: false` and the tagged long URL.
    pub async fn shorten(&self, url: &str, utm: &Utm) -> ShortenResult {
        let long_url = utm.append_to(url);
        match self.try_shorten(&long_url).await {
            Ok(Some(short)) => ShortenResult { success: true, url: short },
            Ok(None) => ShortenResult { success: false, url: long_url },
            Err(e) => {
                warn!(error = %e, "link shortening failed");
                ShortenResult { success: false, url: long_url }
            }
        }
    }

    async fn try_shorten(&self, long_url: &str) -> Result<Option<String>> {
        let query = Query::new().set("access_token", &self.bitly_token).set("longUrl", long_url);
        let resp = self.http.get(&self.shorten_url).query(&query).send().await?;
        let body: BitlyResponse = resp.json().await?;
        let short = body.data.get("url").and_then(Value::as_str);
        match (body.status_code, short) {
            (Some(200), Some(short)) => Ok(Some(short.to_owned())),
            (code, _) => {
                debug!(status_code = ?code, status = ?body.status_txt, "shortener declined");
                Ok(None)
            }
        }
    }
}
