// src/probe/client.rs
use super::failure::{snippet, FailureReason};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tokio::time::{timeout, Duration};
use tracing::debug;
use url::Url;

/// HTTP client bound to the service under test.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

/// A fully read response. The body is kept as text so it can be quoted in
/// diagnostics even when it is not JSON.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiClient {
    pub fn new(base_url: Url) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("relief-smoke/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, mut base_url: Url) -> Self {
        // Url::join drops the last path segment unless it ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path relative to the base URL, keeping any path
    /// prefix the base URL carries.
    pub fn endpoint(&self, path: &str) -> Result<Url, FailureReason> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| FailureReason::Setup(format!("invalid endpoint `{}`: {}", path, e)))
    }

    pub fn get(&self, path: &str) -> Result<RequestBuilder, FailureReason> {
        Ok(self.http.get(self.endpoint(path)?))
    }

    pub fn post(&self, path: &str) -> Result<RequestBuilder, FailureReason> {
        Ok(self.http.post(self.endpoint(path)?))
    }

    /// Send `request` and read the whole body, bounded by `limit`.
    pub async fn exchange(
        &self,
        request: RequestBuilder,
        limit: Duration,
    ) -> Result<ApiResponse, FailureReason> {
        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(ApiResponse { status, body })
        };

        match timeout(limit, exchange).await {
            Ok(Ok(response)) => {
                debug!(
                    status = %response.status,
                    bytes = response.body.len(),
                    "Response received"
                );
                Ok(response)
            }
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(FailureReason::Timeout(limit)),
        }
    }
}

impl ApiResponse {
    pub fn expect_status(self, expected: StatusCode) -> Result<Self, FailureReason> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(FailureReason::UnexpectedStatus {
                status: self.status.as_u16(),
                body: snippet(&self.body),
            })
        }
    }

    pub fn json(&self) -> Result<Value, FailureReason> {
        serde_json::from_str(&self.body).map_err(|e| FailureReason::MalformedBody(e.to_string()))
    }

    /// `200 OK` with a JSON body.
    pub fn ok_json(self) -> Result<Value, FailureReason> {
        self.expect_status(StatusCode::OK)?.json()
    }
}
