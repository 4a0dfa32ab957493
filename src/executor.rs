//! Single timed HTTP requests.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tokio::time::Instant;

use crate::{error::RequestError, headers::HeaderSet, report::RequestReport, target::Target};

/// Performs one request and reports its outcome.
///
/// Implementations never fail: every error is folded into the returned report.
#[async_trait]
pub trait Executor: Send + Sync + 'static {
    /// Run a single request.
    async fn execute(&self) -> RequestReport;
}

/// Sends `GET` requests to a fixed target with a fixed set of headers.
#[derive(Clone)]
pub struct HttpExecutor {
    client: Client,
    target: Target,
    headers: HeaderSet,
}

impl HttpExecutor {
    /// Create an executor with a default client.
    ///
    /// `timeout` bounds each request from connect until the body is read. Without
    /// it a request that never completes never reports.
    pub fn new(target: Target, headers: HeaderSet, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, target, headers))
    }

    /// Create an executor that sends through the given client.
    pub fn with_client(client: Client, target: Target, headers: HeaderSet) -> Self {
        Self { client, target, headers }
    }

    /// Returns the target of this executor.
    pub fn target(&self) -> &Target {
        &self.target
    }

    async fn send(&self) -> Result<(StatusCode, u64), RequestError> {
        let url = Url::parse(self.target.as_str())
            .map_err(|source| RequestError::InvalidUrl { url: self.target.to_string(), source })?;
        let headers = self.headers.to_header_map()?;

        let resp = self.client.get(url).headers(headers).send().await.map_err(RequestError::Transport)?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(RequestError::Body)?;

        Ok((status, body.len() as u64))
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    async fn execute(&self) -> RequestReport {
        let t = Instant::now();
        match self.send().await {
            Ok((status, bytes)) => RequestReport {
                target: self.target.to_string(),
                status: status.into(),
                status_text: status.to_string(),
                bytes,
                duration: t.elapsed(),
            },
            Err(e) => {
                tracing::debug!(url = %self.target, error = %e, "request failed");
                RequestReport::failed(self.target.as_str(), &e, t.elapsed())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        status::{SENTINEL_CODE, Status},
        test_support::{TestServer, unreachable_addr},
    };

    #[tokio::test]
    async fn test_successful_request() {
        let server = TestServer::spawn(|_| (200, "0123456789")).await;
        let exec = HttpExecutor::new(Target::new(server.url()), HeaderSet::default(), None).unwrap();

        let report = exec.execute().await;
        assert!(report.success());
        assert_eq!(report.status, Status::success(200));
        assert_eq!(report.status_text, "200 OK");
        assert_eq!(report.bytes, 10);
        assert_eq!(report.target, server.url());
    }

    #[tokio::test]
    async fn test_server_error_is_not_success() {
        let server = TestServer::spawn(|_| (500, "oops")).await;
        let exec = HttpExecutor::new(Target::new(server.url()), HeaderSet::default(), None).unwrap();

        let report = exec.execute().await;
        assert!(!report.success());
        assert_eq!(report.status, Status::server_error(500));
        assert_eq!(report.bytes, 4);
    }

    #[tokio::test]
    async fn test_headers_are_sent() {
        let server = TestServer::spawn(|_| (200, "ok")).await;
        let headers = HeaderSet::new(["X-Token:a:b", "dropped", "X-Trace:1"]);
        let exec = HttpExecutor::new(Target::new(server.url()), headers, None).unwrap();

        assert!(exec.execute().await.success());
        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        let head = requests[0].to_ascii_lowercase();
        assert!(head.starts_with("get / "), "{head}");
        assert!(head.contains("\r\nx-token: a:b\r\n"), "{head}");
        assert!(head.contains("\r\nx-trace: 1\r\n"), "{head}");
        assert!(!head.contains("dropped"), "{head}");
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let target = Target::new(format!("http://{}", unreachable_addr().await));
        let exec = HttpExecutor::new(target, HeaderSet::default(), None).unwrap();

        let report = exec.execute().await;
        assert!(!report.success());
        assert_eq!(report.status.code(), SENTINEL_CODE);
        assert_eq!(report.bytes, 0);
        assert!(report.status_text.starts_with("request failed"), "{}", report.status_text);
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let exec = HttpExecutor::new(Target::new("http://exa mple.com"), HeaderSet::default(), None).unwrap();

        let report = exec.execute().await;
        assert_eq!(report.status, Status::transport_failure());
        assert!(report.status_text.starts_with("invalid URL"), "{}", report.status_text);
    }

    #[tokio::test]
    async fn test_invalid_header_fails_the_request() {
        let server = TestServer::spawn(|_| (200, "ok")).await;
        let exec = HttpExecutor::new(Target::new(server.url()), HeaderSet::new(["bad key:v"]), None).unwrap();

        let report = exec.execute().await;
        assert_eq!(report.status.code(), SENTINEL_CODE);
        assert!(report.status_text.starts_with("invalid header name"), "{}", report.status_text);
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_timeout_fails_the_request() {
        let server = TestServer::spawn_silent().await;
        let exec =
            HttpExecutor::new(Target::new(server.url()), HeaderSet::default(), Some(Duration::from_millis(100)))
                .unwrap();

        let report = exec.execute().await;
        assert_eq!(report.status.code(), SENTINEL_CODE);
        assert!(report.duration >= Duration::from_millis(100));
    }
}
