//! Core error types for gapwise-core.
//!
//! The scheduling pipeline itself degrades to partial or empty results on
//! bad data instead of failing; these types cover the conditions that do
//! propagate -- configuration IO, enrichment transport failures surfaced to
//! the fallback path, and caller-side parse errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for gapwise-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Enrichment-related errors
    #[error("Enrichment error: {0}")]
    Enrich(#[from] EnrichError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Metadata-enrichment errors. Every variant routes the affected memo onto
/// the heuristic fallback path; none of them aborts a pipeline run.
#[derive(Error, Debug)]
pub enum EnrichError {
    /// Endpoint reachable but answered with a non-success status
    #[error("Enrichment endpoint returned HTTP {status}")]
    Http { status: u16 },

    /// Request could not be sent or the connection dropped
    #[error("Enrichment request failed: {0}")]
    Transport(String),

    /// The bounded wait elapsed before a response arrived
    #[error("Enrichment timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Response arrived but did not match the endpoint contract
    #[error("Enrichment payload invalid: {0}")]
    InvalidPayload(String),

    /// Enrichment is disabled by configuration
    #[error("Enrichment disabled")]
    Disabled,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
