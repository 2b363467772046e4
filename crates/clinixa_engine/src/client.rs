use std::time::Duration;

use clinixa_core::{AnalysisResult, SymptomRequest};
use clinixa_logging::{clinixa_debug, clinixa_info};
use serde::Deserialize;
use url::Url;

use crate::{FailureKind, TransportError, ANALYSIS_FALLBACK};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const ANALYZE_PATH: &str = "analyze-symptoms";
const HEALTH_PATH: &str = "health";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// Whole-request deadline. `None` lets a call run to completion.
    pub request_timeout: Option<Duration>,
}

impl ClientSettings {
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// Boundary to the remote analysis service.
#[async_trait::async_trait]
pub trait AnalysisClient: Send + Sync {
    /// `POST {base_url}/analyze-symptoms`.
    async fn analyze(&self, request: &SymptomRequest) -> Result<AnalysisResult, TransportError>;

    /// `GET {base_url}/health`; the body is arbitrary JSON.
    async fn health(&self) -> Result<serde_json::Value, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalysisClient {
    settings: ClientSettings,
    http: reqwest::Client,
}

impl ReqwestAnalysisClient {
    pub fn new(settings: ClientSettings) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| TransportError::new(FailureKind::Unreachable, err.to_string()))?;
        Ok(Self { settings, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        let base = self.settings.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}"))
            .map_err(|err| TransportError::new(FailureKind::Unreachable, err.to_string()))
    }

    /// No status line was received. Connect failures (including connect
    /// timeouts) are always `Unreachable`; `Timeout` needs a request deadline.
    fn send_error(&self, err: reqwest::Error) -> TransportError {
        let kind = if err.is_connect() {
            FailureKind::Unreachable
        } else if err.is_timeout() && self.settings.request_timeout.is_some() {
            FailureKind::Timeout
        } else {
            FailureKind::Unreachable
        };
        TransportError::new(kind, err.to_string())
    }

    /// The status line arrived but the body could not be read in full.
    fn body_error(&self, status: reqwest::StatusCode, err: reqwest::Error) -> TransportError {
        clinixa_debug!("body read failed status={} err={}", status.as_u16(), err);
        if err.is_timeout() && self.settings.request_timeout.is_some() {
            return TransportError::new(FailureKind::Timeout, err.to_string());
        }
        if status.is_success() {
            TransportError::new(FailureKind::MalformedResponse, err.to_string())
        } else {
            TransportError::new(
                FailureKind::Application {
                    status: status.as_u16(),
                },
                ANALYSIS_FALLBACK,
            )
        }
    }
}

#[async_trait::async_trait]
impl AnalysisClient for ReqwestAnalysisClient {
    async fn analyze(&self, request: &SymptomRequest) -> Result<AnalysisResult, TransportError> {
        let url = self.endpoint(ANALYZE_PATH)?;
        clinixa_debug!("POST {}", url);

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|err| self.send_error(err))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.body_error(status, err))?;

        if !status.is_success() {
            return Err(TransportError::new(
                FailureKind::Application {
                    status: status.as_u16(),
                },
                detail_or_fallback(&body),
            ));
        }

        let result: AnalysisResult = serde_json::from_slice(&body)
            .map_err(|err| TransportError::new(FailureKind::MalformedResponse, err.to_string()))?;
        clinixa_info!(
            "analysis received status={} conditions={} precautions={}",
            status.as_u16(),
            result.possible_diseases.len(),
            result.precautions.len()
        );
        Ok(result)
    }

    async fn health(&self) -> Result<serde_json::Value, TransportError> {
        let url = self.endpoint(HEALTH_PATH)?;
        clinixa_debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| self.send_error(err))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.body_error(status, err))?;

        if !status.is_success() {
            return Err(TransportError::new(
                FailureKind::Application {
                    status: status.as_u16(),
                },
                detail_or_fallback(&body),
            ));
        }

        serde_json::from_slice(&body)
            .map_err(|err| TransportError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Error bodies carry a human-readable `detail`; anything else gets the fallback text.
fn detail_or_fallback(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| match parsed.detail {
            Some(serde_json::Value::String(detail)) if !detail.trim().is_empty() => Some(detail),
            _ => None,
        })
        .unwrap_or_else(|| ANALYSIS_FALLBACK.to_string())
}
