//! HTTP-backed metadata enricher.
//!
//! Posts the enrichment request as JSON and expects the endpoint contract
//! `{ genre, importance in {low,medium,high}, sessionDuration,
//! totalDurationExpected }`. The call is bounded by a timeout; every
//! failure mode maps onto an [`EnrichError`] so the pipeline can fall back
//! to the heuristic without surfacing anything to the caller.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EnrichError;
use crate::memo::Importance;

use super::{Enrichment, EnrichmentRequest, MetadataEnricher};

const DEFAULT_TIMEOUT_MS: u64 = 1500;

#[derive(Serialize)]
struct RequestPayload<'a> {
    id: &'a str,
    title: &'a str,
    #[serde(rename = "type")]
    kind: crate::memo::MemoKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    deadline: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePayload {
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    importance: Option<String>,
    #[serde(default)]
    session_duration: Option<i64>,
    #[serde(default)]
    total_duration_expected: Option<i64>,
}

impl ResponsePayload {
    fn into_enrichment(self) -> Result<Enrichment, EnrichError> {
        let importance = match self.importance.as_deref() {
            None => None,
            Some("low") => Some(Importance::Low),
            Some("medium") => Some(Importance::Medium),
            Some("high") => Some(Importance::High),
            Some(other) => {
                return Err(EnrichError::InvalidPayload(format!(
                    "unknown importance '{other}'"
                )))
            }
        };
        if self.session_duration.is_some_and(|m| m <= 0) {
            return Err(EnrichError::InvalidPayload(
                "sessionDuration must be positive".to_string(),
            ));
        }
        if self.total_duration_expected.is_some_and(|m| m <= 0) {
            return Err(EnrichError::InvalidPayload(
                "totalDurationExpected must be positive".to_string(),
            ));
        }
        Ok(Enrichment {
            genre: self.genre,
            importance,
            session_minutes: self.session_duration,
            total_minutes_expected: self.total_duration_expected,
        })
    }
}

/// Enricher that calls a remote metadata endpoint.
pub struct HttpEnricher {
    endpoint: String,
    timeout: Duration,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl HttpEnricher {
    /// Create an enricher for the given endpoint with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the internal runtime cannot be created.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, EnrichError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| EnrichError::Transport(e.to_string()))?;
        Ok(Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            client: reqwest::Client::new(),
            runtime,
        })
    }

    /// Set the per-call timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout = Duration::from_millis(timeout_ms);
        self
    }
}

impl MetadataEnricher for HttpEnricher {
    fn name(&self) -> &str {
        "http"
    }

    fn enrich(&self, request: &EnrichmentRequest) -> Result<Enrichment, EnrichError> {
        let payload = RequestPayload {
            id: &request.id,
            title: &request.title,
            kind: request.kind,
            deadline: request.deadline,
        };

        let call = async {
            let resp = self
                .client
                .post(&self.endpoint)
                .json(&payload)
                .send()
                .await
                .map_err(|e| EnrichError::Transport(e.to_string()))?;

            if !resp.status().is_success() {
                return Err(EnrichError::Http {
                    status: resp.status().as_u16(),
                });
            }

            let body: ResponsePayload = resp
                .json()
                .await
                .map_err(|e| EnrichError::InvalidPayload(e.to_string()))?;
            body.into_enrichment()
        };

        match self.runtime.block_on(tokio::time::timeout(self.timeout, call)) {
            Ok(result) => result,
            Err(_) => Err(EnrichError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }
}
