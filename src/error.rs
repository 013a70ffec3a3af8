//! Error taxonomy for the transformation pipeline

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, TransformError>;

/// Failure reported by a generation provider for a single attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderFailure {
    RateLimited,
    Timeout,
    Unavailable,
    Network(String),
    AuthenticationFailed,
    InvalidRequest(String),
    Upstream(u16),
    EmptyResponse,
}

impl ProviderFailure {
    /// Whether the retry loop may consume this failure and try again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderFailure::RateLimited
                | ProviderFailure::Timeout
                | ProviderFailure::Unavailable
                | ProviderFailure::Network(_)
                | ProviderFailure::EmptyResponse
        )
    }
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderFailure::RateLimited => write!(f, "rate limit exceeded"),
            ProviderFailure::Timeout => write!(f, "request timed out"),
            ProviderFailure::Unavailable => write!(f, "service unavailable"),
            ProviderFailure::Network(message) => write!(f, "network error: {message}"),
            ProviderFailure::AuthenticationFailed => write!(f, "authentication failed"),
            ProviderFailure::InvalidRequest(message) => write!(f, "invalid request: {message}"),
            ProviderFailure::Upstream(status) => write!(f, "upstream error: HTTP {status}"),
            ProviderFailure::EmptyResponse => write!(f, "provider returned no content"),
        }
    }
}

/// Pipeline error types
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("input rejected: {}", errors.join("; "))]
    InvalidInput { errors: Vec<String> },

    #[error("assembled prompt rejected: {message}")]
    InvalidPrompt { message: String },

    #[error("provider failed on attempt {attempt}: {failure}")]
    Provider { failure: ProviderFailure, attempt: u32 },

    #[error("quality threshold {threshold} not met after {attempts} attempt(s)")]
    QualityThresholdNotMet { threshold: f64, attempts: u32 },

    #[error("transformation cancelled by caller")]
    Cancelled,

    #[error("configuration error: {message}")]
    Config { message: String },
}

impl TransformError {
    /// Non-retryable errors abort the pipeline regardless of remaining budget
    pub fn is_fatal(&self) -> bool {
        match self {
            TransformError::Provider { failure, .. } => !failure.is_retryable(),
            _ => true,
        }
    }
}
