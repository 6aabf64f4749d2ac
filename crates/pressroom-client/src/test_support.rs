//! In-process backend for client tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use pressroom_common::config::AppConfig;
use pressroom_common::models::SessionUser;

use crate::client::ApiClient;
use crate::session::{MemorySession, SessionProvider};

pub(crate) const PID: &str = "pub-1";
pub(crate) const TOKEN: &str = "tok-123";

/// An axum app bound to an ephemeral port that counts every request it sees.
pub(crate) struct Backend {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

async fn count(State(hits): State<Arc<AtomicUsize>>, req: Request, next: Next) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    next.run(req).await
}

impl Backend {
    pub async fn spawn(router: Router) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = router
            .fallback(|| async { StatusCode::NOT_FOUND })
            .layer(middleware::from_fn_with_state(hits.clone(), count));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { url: format!("http://{addr}"), hits }
    }

    /// A backend that answers 404 to everything; used to prove nothing was sent.
    pub async fn empty() -> Self {
        Self::spawn(Router::new()).await
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> AppConfig {
        AppConfig::local(&self.url, PID)
    }

    pub fn client(&self, session: Arc<dyn SessionProvider>) -> ApiClient {
        ApiClient::new(&self.config(), session).unwrap()
    }

    pub fn signed_in_client(&self) -> ApiClient {
        self.client(signed_in())
    }

    pub fn anonymous_client(&self) -> ApiClient {
        self.client(Arc::new(MemorySession::new()))
    }
}

pub(crate) fn signed_in() -> Arc<MemorySession> {
    Arc::new(MemorySession::signed_in(
        TOKEN,
        SessionUser { id: "u-1".into(), username: Some("jane".into()) },
    ))
}
