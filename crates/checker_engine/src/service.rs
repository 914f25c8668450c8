use std::time::Duration;

use checker_logging::{checker_debug, checker_warn};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::{CheckFailure, FailureKind};

/// Route served by the reference backend on its default port.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/check-url";

#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
        }
    }
}

/// The backend that decides whether a query is authentic.
#[async_trait::async_trait]
pub trait CheckService: Send + Sync {
    async fn check(&self, query: &str) -> Result<Value, CheckFailure>;
}

#[derive(Serialize)]
struct CheckBody<'a> {
    url: &'a str,
}

/// POSTs `{"url": <query>}` to the configured endpoint and parses the JSON reply.
#[derive(Debug, Clone)]
pub struct HttpCheckService {
    endpoint: Url,
    max_bytes: u64,
    client: reqwest::Client,
}

impl HttpCheckService {
    pub fn new(settings: CheckSettings) -> Result<Self, CheckFailure> {
        let endpoint = Url::parse(&settings.endpoint)
            .map_err(|err| CheckFailure::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(CheckFailure::new(
                FailureKind::InvalidEndpoint,
                format!("unsupported scheme {}", endpoint.scheme()),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| CheckFailure::new(FailureKind::Connect, err.to_string()))?;

        Ok(Self {
            endpoint,
            max_bytes: settings.max_bytes,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl CheckService for HttpCheckService {
    async fn check(&self, query: &str) -> Result<Value, CheckFailure> {
        let body = serde_json::to_vec(&CheckBody { url: query })
            .map_err(|err| CheckFailure::new(FailureKind::MalformedBody, err.to_string()))?;
        checker_debug!("POST {} body_len={}", self.endpoint, body.len());

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            checker_warn!("Backend answered {} for {}", status, self.endpoint);
            return Err(CheckFailure::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(too_large(self.max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(too_large(self.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| CheckFailure::new(FailureKind::MalformedBody, err.to_string()))
    }
}

fn too_large(max_bytes: u64, actual: u64) -> CheckFailure {
    CheckFailure::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> CheckFailure {
    if err.is_timeout() {
        return CheckFailure::new(FailureKind::Timeout, err.to_string());
    }
    CheckFailure::new(FailureKind::Connect, err.to_string())
}
