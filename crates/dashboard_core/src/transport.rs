//! HTTP access to the Vedabyte engine service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use shared::{
    error::BackendErrorBody,
    protocol::{
        parse_process_response, BenchmarkRecord, ProcessOutput, ProcessRequest, BENCHMARK_PATH,
        PROCESS_PATH,
    },
};
use tracing::debug;
use url::Url;

use crate::{config::Settings, error::DashboardError};

/// The two backend calls the dashboard makes.
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    async fn process(&self, digits: &[i64]) -> Result<ProcessOutput, DashboardError>;
    async fn benchmark(&self) -> Result<Vec<BenchmarkRecord>, DashboardError>;
}

pub struct HttpBackend {
    http: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, DashboardError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, DashboardError> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, DashboardError> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs.filter(|secs| *secs > 0) {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(DashboardError::ClientBuild)?;
        Self::with_client(http, &settings.backend_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, DashboardError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| DashboardError::InvalidBackendUrl {
                url: self.base_url.to_string(),
                reason: err.to_string(),
            })
    }

    async fn read_json(&self, request: RequestBuilder, endpoint: &Url) -> Result<Value, DashboardError> {
        let transport = |source| DashboardError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let text = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(DashboardError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                detail: BackendErrorBody::describe(&text),
            });
        }

        serde_json::from_str(&text).map_err(|source| DashboardError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait]
impl DashboardBackend for HttpBackend {
    async fn process(&self, digits: &[i64]) -> Result<ProcessOutput, DashboardError> {
        let endpoint = self.endpoint(PROCESS_PATH)?;
        debug!(%endpoint, digits = digits.len(), "posting process request");
        let request = self.http.post(endpoint.clone()).json(&ProcessRequest {
            digits: digits.to_vec(),
        });
        let body = self.read_json(request, &endpoint).await?;
        parse_process_response(body).map_err(|source| DashboardError::Malformed {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    async fn benchmark(&self) -> Result<Vec<BenchmarkRecord>, DashboardError> {
        let endpoint = self.endpoint(BENCHMARK_PATH)?;
        debug!(%endpoint, "fetching benchmark series");
        let body = self.read_json(self.http.get(endpoint.clone()), &endpoint).await?;
        serde_json::from_value(body).map_err(|source| DashboardError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

/// Parses the configured base address so relative endpoint joins keep any
/// path prefix (`http://host/engine` -> `http://host/engine/api/process`).
pub fn normalize_base_url(raw: &str) -> Result<Url, DashboardError> {
    let raw = raw.trim();
    let invalid = |reason: String| DashboardError::InvalidBackendUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
