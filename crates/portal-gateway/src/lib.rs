//! # portal-gateway
//!
//! Network gateway to the academic portal.
//!
//! One call issues one HTTP GET and resolves to the response body. The
//! [`Gateway`] trait is the seam the sync orchestrator depends on, so tests
//! can script responses without a network.

mod error;
mod http;

pub use error::GatewayError;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use portal_config::GatewayConfig;
use reqwest::header::{ACCEPT, COOKIE, HeaderMap, HeaderValue};

use crate::http::{classify, screen_response};

/// Fetches raw response bodies from the portal.
pub trait Gateway: Send + Sync + 'static {
    /// Issue one request for `url` and return the body.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] for transport failures, timeouts, an
    /// expired session, and non-success statuses. An empty body is
    /// returned as `Ok("")`.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, GatewayError>> + Send;
}

impl<G: Gateway> Gateway for Arc<G> {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, GatewayError>> + Send {
        (**self).fetch(url)
    }
}

/// reqwest-backed gateway carrying the portal session cookie.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
}

impl HttpGateway {
    /// Build a gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidHeader`] if the session cookie is not a
    /// valid header value, or [`GatewayError::Http`] if the client fails to build.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if config.has_session() {
            let cookie = HeaderValue::from_str(&config.session_cookie)
                .map_err(|_| GatewayError::InvalidHeader { name: "Cookie" })?;
            headers.insert(COOKIE, cookie);
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { http })
    }
}

impl Gateway for HttpGateway {
    async fn fetch(&self, url: &str) -> Result<String, GatewayError> {
        tracing::debug!(url, "fetching");
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| classify(e, url))?;
        let resp = screen_response(resp).await?;
        let body = resp.text().await.map_err(|e| classify(e, url))?;
        tracing::debug!(url, bytes = body.len(), "fetched");
        Ok(body)
    }
}
