//! Provider trait definitions for dependency injection

use async_trait::async_trait;

use crate::error::ProviderFailure;
use crate::types::{HyperParameters, ProviderResponse, RequestId, TransformationType};

/// Everything a generation provider needs for one attempt
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    pub prompt: String,
    pub hyper_parameters: HyperParameters,
    /// Context metadata for logging and telemetry only
    pub request_id: RequestId,
    pub transformation_type: TransformationType,
}

/// Opaque text-generation capability: prompt in, text out; may fail transiently
#[mockall::automock]
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text for the assembled prompt under the given hyperparameters
    async fn generate(&self, request: GenerationRequest) -> Result<ProviderResponse, ProviderFailure>;

    /// Stable name for logs and telemetry
    fn name(&self) -> &'static str {
        "provider"
    }
}
