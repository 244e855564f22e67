use shared::error::ProtocolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid backend url `{url}`: {reason}")]
    InvalidBackendUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}: {detail}")]
    Status {
        endpoint: String,
        status: u16,
        detail: String,
    },
    #[error("{endpoint} returned an undecodable body: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{endpoint} returned a malformed body: {source}")]
    Malformed {
        endpoint: String,
        #[source]
        source: ProtocolError,
    },
}

impl DashboardError {
    /// HTTP status reported by the backend, when the failure got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            DashboardError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
