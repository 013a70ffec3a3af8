//! Concrete generation providers and the ordered fallback chain

pub mod http;

pub use http::HttpProvider;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::ProviderFailure;
use crate::traits::{GenerationProvider, GenerationRequest};
use crate::types::ProviderResponse;

/// Ordered list of providers tried in sequence under one success/failure
/// contract: the first success wins, otherwise the last failure is returned
pub struct ProviderChain {
    providers: Vec<Arc<dyn GenerationProvider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn GenerationProvider>>) -> Self {
        Self { providers }
    }
}

#[async_trait]
impl GenerationProvider for ProviderChain {
    async fn generate(&self, request: GenerationRequest) -> Result<ProviderResponse, ProviderFailure> {
        let mut last_failure = ProviderFailure::Unavailable;
        for provider in &self.providers {
            match provider.generate(request.clone()).await {
                Ok(response) => {
                    debug!(provider = provider.name(), "chain served request");
                    return Ok(response);
                }
                Err(failure) => {
                    warn!(provider = provider.name(), %failure, "chain provider failed, trying next");
                    last_failure = failure;
                }
            }
        }
        Err(last_failure)
    }

    fn name(&self) -> &'static str {
        "chain"
    }
}
