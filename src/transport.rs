use std::time::Duration;

use async_trait::async_trait;
use http::header::HeaderName;
use http::Method;
use reqwest::Client as ReqwestClient;

use crate::Result;

/// A fully signed request, ready to go on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(HeaderName, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Sends a request and hands back the raw response body.
///
/// Implementations must not interpret the HTTP status; connection-level
/// failures are reported as [`Error::Transport`](crate::Error::Transport).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<String>;
}

/// [`Transport`] backed by `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    inner: ReqwestClient,
}

impl ReqwestTransport {
    /// Constructs a new `ReqwestTransport`.
    ///
    /// This method calls reqwest::Client::new() internally.
    pub fn new() -> Self {
        ReqwestTransport {
            inner: ReqwestClient::new(),
        }
    }

    /// Constructs a transport whose requests give up after `timeout`.
    ///
    /// The timeout is applied from when the request starts connecting until
    /// the response body has finished.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let inner = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(ReqwestTransport { inner })
    }
}

impl From<ReqwestClient> for ReqwestTransport {
    fn from(client: ReqwestClient) -> Self {
        ReqwestTransport { inner: client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<String> {
        let mut builder = self.inner.request(request.method, &request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;
        Ok(response.text().await?)
    }
}
