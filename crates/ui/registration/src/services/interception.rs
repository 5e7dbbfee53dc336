//! Development/test request interception.
//!
//! Wraps a real transport and answers matching requests locally with a bare
//! `200 OK`, so the form can be exercised without a backend. Requests that
//! match no route are handed to the inner transport untouched.
//!
//! Only compiled with the `mock` feature (and in unit tests).

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use tracing::debug;
use url::Url;

use super::submission::{Transport, TransportError, TransportResponse};

/// A single intercepted request shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRoute {
    pub method: Method,
    pub url: Url,
}

impl MockRoute {
    pub fn post(url: Url) -> Self {
        Self {
            method: Method::POST,
            url,
        }
    }

    fn matches(&self, method: &Method, url: &Url) -> bool {
        &self.method == method && same_resource(&self.url, url)
    }
}

/// `http://h/a` and `http://h/a/` name the same resource here.
fn same_resource(a: &Url, b: &Url) -> bool {
    a.as_str().trim_end_matches('/') == b.as_str().trim_end_matches('/')
}

pub struct InterceptingTransport {
    routes: Vec<MockRoute>,
    inner: Arc<dyn Transport>,
}

impl InterceptingTransport {
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        Self {
            routes: Vec::new(),
            inner,
        }
    }

    /// The registration handler: `POST <endpoint>` answers 200 with no body.
    pub fn for_endpoint(inner: Arc<dyn Transport>, endpoint: Url) -> Self {
        Self::new(inner).route(MockRoute::post(endpoint))
    }

    pub fn route(mut self, route: MockRoute) -> Self {
        self.routes.push(route);
        self
    }

    fn intercepts(&self, method: &Method, url: &Url) -> bool {
        self.routes.iter().any(|r| r.matches(method, url))
    }
}

#[async_trait]
impl Transport for InterceptingTransport {
    async fn post_json(
        &self,
        url: &Url,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, TransportError> {
        if self.intercepts(&Method::POST, url) {
            debug!(%url, "intercepted POST, answering 200");
            return Ok(TransportResponse::empty(StatusCode::OK));
        }
        // bypass
        self.inner.post_json(url, body).await
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for Counting {
        async fn post_json(
            &self,
            _url: &Url,
            _body: &serde_json::Value,
        ) -> Result<TransportResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(TransportResponse::new(StatusCode::IM_A_TEAPOT, "from inner"))
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test]
    async fn matching_post_is_answered_locally() {
        let inner = Arc::new(Counting::default());
        let mock = InterceptingTransport::for_endpoint(inner.clone(), url("http://localhost:5173"));

        let resp = mock
            .post_json(&url("http://localhost:5173/"), &serde_json::json!({}))
            .await
            .unwrap();

        assert_eq!(resp, TransportResponse::empty(StatusCode::OK));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unmatched_requests_bypass_to_inner() {
        let inner = Arc::new(Counting::default());
        let mock = InterceptingTransport::for_endpoint(inner.clone(), url("http://localhost:5173"));

        let resp = mock
            .post_json(&url("http://localhost:5173/other"), &serde_json::json!({}))
            .await
            .unwrap();

        assert_eq!(resp.status, StatusCode::IM_A_TEAPOT);
        assert_eq!(resp.body, "from inner");
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn only_post_routes_match_post() {
        let inner = Arc::new(Counting::default());
        let mock = InterceptingTransport::new(inner).route(MockRoute {
            method: Method::PUT,
            url: url("http://localhost:5173"),
        });
        assert!(!mock.intercepts(&Method::POST, &url("http://localhost:5173/")));
        assert!(mock.intercepts(&Method::PUT, &url("http://localhost:5173/")));
    }
}
