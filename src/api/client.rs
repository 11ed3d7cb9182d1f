//! HTTP client for the monitoring API.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{
    ComparisonPayload, FetchError, MetricsApi, PerformancePayload, StatusPayload,
    COMPARISON_PATH, PERFORMANCE_PATH, STATUS_PATH,
};

/// Talks to the monitoring API over plain HTTP GET requests.
///
/// The underlying connection pool is shared by every cycle, so cloning is cheap.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sagin_monitor::ApiClient;
///
/// let client = ApiClient::new("http://localhost:8080/api", Duration::from_secs(4)).unwrap();
/// assert_eq!(client.endpoint("/status"), "http://localhost:8080/api/status");
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::from_reqwest(base_url, e))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.endpoint(path);
        debug!(%url, "fetching");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "non-success response");
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::from_reqwest(&url, e))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl MetricsApi for ApiClient {
    async fn status(&self) -> Result<StatusPayload, FetchError> {
        self.get_json(STATUS_PATH).await
    }

    async fn performance(&self) -> Result<PerformancePayload, FetchError> {
        self.get_json(PERFORMANCE_PATH).await
    }

    async fn comparison(&self) -> Result<ComparisonPayload, FetchError> {
        self.get_json(COMPARISON_PATH).await
    }

    fn description(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response and return the base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let mut request = Vec::new();
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/api", addr)
    }

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_endpoint_joining() {
        let client = client("http://localhost:8080/api/");
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.endpoint(STATUS_PATH), "http://localhost:8080/api/status");
        assert_eq!(
            client.endpoint(COMPARISON_PATH),
            "http://localhost:8080/api/sagin/comparison"
        );
    }

    #[tokio::test]
    async fn test_fetch_status_success() {
        let base = serve_once(
            "200 OK",
            r#"{"nodes":{"client":{"status":"running","pid":7}},"circuit":{"status":"established","hops":3}}"#,
        )
        .await;

        let status = client(&base).status().await.unwrap();
        assert_eq!(status.circuit.unwrap().hops, Some(3));
        assert_eq!(status.nodes.unwrap()["client"].pid, Some(7));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let base = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;

        let err = client(&base).performance().await.unwrap_err();
        assert_eq!(
            err,
            FetchError::Status {
                url: format!("{}/performance", base),
                status: 500,
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let base = serve_once("200 OK", "<html>not json</html>").await;

        let err = client(&base).comparison().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}/api", addr)).status().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }), "got {:?}", err);
    }
}
