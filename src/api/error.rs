//! Error types for API requests.

use thiserror::Error;

/// Reasons a single endpoint request can fail.
///
/// Every variant counts as a failed cycle; none of them is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, timeout or I/O failure before a response arrived.
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// 2xx response whose body is not the expected JSON.
    #[error("invalid response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// Classify a reqwest error for the given URL.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else if err.is_timeout() {
            FetchError::Transport {
                url: url.to_string(),
                message: "timed out".to_string(),
            }
        } else if let Some(status) = err.status() {
            FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// URL of the request that failed.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = FetchError::Status {
            url: "http://localhost:8080/api/status".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "http://localhost:8080/api/status returned HTTP 503");
        assert_eq!(err.url(), "http://localhost:8080/api/status");
    }
}
