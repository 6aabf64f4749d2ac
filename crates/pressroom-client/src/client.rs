//! Async REST client for the Pressroom backend.

use std::sync::Arc;
use std::time::Duration;

use pressroom_common::config::AppConfig;
use pressroom_common::error::Resource;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ApiError, Result};
use crate::session::SessionProvider;

/// Header carrying the session token.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Async Pressroom REST client.
///
/// Stateless apart from the shared connection pool: every method builds one
/// request, sends it once, and maps the outcome. Nothing is cached or retried.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use pressroom_client::{ApiClient, MemorySession};
///
/// #[tokio::main]
/// async fn main() -> pressroom_client::Result<()> {
///     let config = pressroom_common::config::AppConfig::local("https://api.example.com", "pid");
///     let client = ApiClient::new(&config, Arc::new(MemorySession::new()))?;
///     let tags = client.get_tags().await?;
///     println!("{tags:?}");
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) http: Client,
    base_url: Url,
    publisher_id: String,
    pub(crate) shorten_url: String,
    pub(crate) bitly_token: String,
    pub(crate) session: Arc<dyn SessionProvider>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: Arc<dyn SessionProvider>) -> Result<Self> {
        let base_url = Url::parse(&config.api.base_url)
            .map_err(|e| ApiError::Config(format!("api.base_url {:?}: {e}", config.api.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!("api.base_url {base_url} cannot carry a path")));
        }
        if config.api.publisher_id.trim().is_empty() {
            return Err(ApiError::Config("api.publisher_id is empty".into()));
        }

        let http = Client::builder()
            .default_headers({
                let mut h = HeaderMap::new();
                h.insert(ACCEPT, HeaderValue::from_static("application/json"));
                h
            })
            .connect_timeout(Duration::from_secs(config.http.connect_timeout_secs))
            .user_agent(concat!("Pressroom/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            publisher_id: config.api.publisher_id.clone(),
            shorten_url: config.analytics.shorten_url.clone(),
            bitly_token: config.analytics.bitly_token.clone(),
            session,
        })
    }

    pub fn publisher_id(&self) -> &str {
        &self.publisher_id
    }

    // ── Internal ──────────────────────────────────────────────────────────────

    /// `{base}/{segments...}`, each segment percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Config(format!("{} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `{base}/publishers/{pid}/{segments...}`.
    pub(crate) fn publisher_endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut full = vec!["publishers", self.publisher_id.as_str()];
        full.extend_from_slice(segments);
        self.endpoint(&full)
    }

    /// Session token, or [`ApiError::Unauthorized`] without touching the network.
    pub(crate) fn require_token(&self) -> Result<String> {
        self.session.token().ok_or(ApiError::Unauthorized { resource: Resource::User })
    }

    /// Session token if there is one; the request goes out either way.
    pub(crate) fn session_token(&self) -> Option<String> {
        self.session.token()
    }

    /// Send one request and translate the response.
    pub(crate) async fn execute(&self, req: RequestBuilder) -> Result<Value> {
        let req = req.build()?;
        debug!(method = %req.method(), url = %req.url(), "api request");
        let resp = self.http.execute(req).await?;
        translate(resp).await
    }
}

/// Attach the token header when a token is present.
pub(crate) fn with_token(req: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token.filter(|t| !t.is_empty()) {
        Some(t) => req.header(ACCESS_TOKEN_HEADER, t),
        None => req,
    }
}

/// Shared failure mapping. A non-2xx body carrying `error` is the server's
/// verdict and is passed through as-is; anything else stays a transport error.
async fn translate(resp: Response) -> Result<Value> {
    let status = resp.status();
    let failure = resp.error_for_status_ref().err();
    if let Some(err) = failure {
        let payload = resp
            .json::<Value>()
            .await
            .ok()
            .and_then(|mut body| body.get_mut("error").map(Value::take))
            .filter(|e| !e.is_null());
        return Err(match payload {
            Some(payload) => ApiError::Server { status: status.as_u16(), payload },
            None => ApiError::Transport(err),
        });
    }

    let bytes = resp.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Pull `key` out of a response body. A missing key decodes as `null`.
pub(crate) fn field<T: DeserializeOwned>(mut body: Value, key: &str) -> Result<T> {
    let value = body.get_mut(key).map(Value::take).unwrap_or(Value::Null);
    Ok(serde_json::from_value(value)?)
}

/// [`field`] for lookups: a missing or null key means the resource is absent.
pub(crate) fn found<T: DeserializeOwned>(mut body: Value, key: &str, resource: Resource) -> Result<T> {
    match body.get_mut(key).map(Value::take) {
        None | Some(Value::Null) => Err(ApiError::NotFound { resource }),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

/// Query parameters, each one omitted when absent.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub(crate) struct Query(Vec<(&'static str, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &'static str, value: impl ToString) -> Self {
        self.0.push((key, value.to_string()));
        self
    }

    pub fn opt(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self,
        }
    }

    /// Filter/sort/option descriptors travel as JSON strings.
    pub fn json<T: Serialize>(self, key: &'static str, value: Option<&T>) -> Result<Self> {
        match value {
            Some(v) => Ok(self.set(key, serde_json::to_string(v)?)),
            None => Ok(self),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
