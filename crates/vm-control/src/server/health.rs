//! Single-shot health check of the running server.

use crate::{ControlError, ControlResult};

use std::panic::Location;
use std::time::{Duration, Instant};

use error_location::ErrorLocation;
use reqwest::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Answered with HTTP 200
    Healthy { latency_ms: u64 },
    /// Answered, but with a status other than 200
    UnexpectedStatus { status: u16 },
    /// Connection refused, timed out, or otherwise failed
    Unreachable { reason: String },
}

impl HealthStatus {
    #[track_caller]
    pub fn into_result(self, url: &str) -> ControlResult<u64> {
        match self {
            Self::Healthy { latency_ms } => Ok(latency_ms),
            Self::UnexpectedStatus { status } => Err(ControlError::HealthUnexpectedStatus {
                url: url.to_string(),
                status,
                location: ErrorLocation::from(Location::caller()),
            }),
            Self::Unreachable { reason } => Err(ControlError::HealthUnreachable {
                url: url.to_string(),
                message: reason,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

pub struct HealthChecker {
    client: reqwest::Client,
    url: String,
}

impl HealthChecker {
    pub fn new(url: impl Into<String>, timeout: Duration) -> ControlResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(1)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue one GET against the health endpoint. Never fails; problems are
    /// reported through [`HealthStatus`].
    pub async fn check(&self) -> HealthStatus {
        let start = Instant::now();

        match self.client.get(&self.url).send().await {
            Ok(resp) if resp.status() == StatusCode::OK => HealthStatus::Healthy {
                latency_ms: start.elapsed().as_millis() as u64,
            },
            Ok(resp) => HealthStatus::UnexpectedStatus {
                status: resp.status().as_u16(),
            },
            Err(e) => HealthStatus::Unreachable {
                reason: e.to_string(),
            },
        }
    }
}
