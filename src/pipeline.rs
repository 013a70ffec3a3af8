//! Transformation pipeline: validate, strategize, generate, score, retry
//!
//! One invocation is a strictly sequential chain of awaited steps with a
//! single suspension point per attempt (the provider call). Terminal states
//! are a genuine success, a best-effort candidate, a rule-based fallback, or
//! a typed error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use rand::Rng;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::core::fallback::{RuleBasedRewriter, FALLBACK_CONFIDENCE, FALLBACK_MODEL_VERSION};
use crate::core::prompt::PromptLibrary;
use crate::core::quality::QualityScorer;
use crate::core::strategy::StrategySelector;
use crate::core::validation::ValidationGate;
use crate::error::{PipelineResult, TransformError};
use crate::traits::{GenerationProvider, GenerationRequest};
use crate::types::{
    ProviderResponse, QualityMetrics, RequestId, ResultMetadata, TransformOutcome, TransformRequest,
    TransformResult,
};

/// Cooperative cancellation checked between attempts; an in-flight provider
/// call is bounded by the per-attempt timeout rather than aborted mid-await
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Best candidate retained across the retry loop
struct Candidate {
    response: ProviderResponse,
    quality: QualityMetrics,
    attempt: u32,
}

/// Quality-gated retry orchestrator over an injected generation provider.
/// Holds no shared mutable state; concurrent invocations are independent.
pub struct TransformationPipeline {
    provider: Arc<dyn GenerationProvider>,
    gate: ValidationGate,
    scorer: QualityScorer,
    selector: StrategySelector,
    prompts: PromptLibrary,
    fallback: RuleBasedRewriter,
    config: PipelineConfig,
}

impl TransformationPipeline {
    pub fn new(provider: Arc<dyn GenerationProvider>, config: PipelineConfig) -> Self {
        let gate = ValidationGate::new(config.validation.clone());
        let prompts = PromptLibrary::new(config.prompt_limits.clone());
        Self {
            provider,
            gate,
            scorer: QualityScorer::new(),
            selector: StrategySelector::new(),
            prompts,
            fallback: RuleBasedRewriter::new(),
            config,
        }
    }

    /// Swap in a custom prompt library (templates are replaceable data)
    pub fn with_prompt_library(mut self, prompts: PromptLibrary) -> Self {
        self.prompts = prompts;
        self
    }

    /// Run one transformation to completion
    pub async fn transform(&self, request: TransformRequest) -> PipelineResult<TransformResult> {
        self.transform_with_cancel(request, &CancelFlag::new()).await
    }

    /// Run one transformation, checking the cancel flag between attempts
    pub async fn transform_with_cancel(
        &self,
        request: TransformRequest,
        cancel: &CancelFlag,
    ) -> PipelineResult<TransformResult> {
        let started = Instant::now();
        let request_id = RequestId::new();

        // Input gate: failures here are non-retryable and the provider is
        // never invoked.
        let input_check = self.gate.validate_input(&request.source_text);
        for warning in &input_check.warnings {
            warn!(request_id = %request_id, warning, "input warning");
        }
        if !input_check.valid {
            return Err(TransformError::InvalidInput {
                errors: input_check.errors,
            });
        }

        let strategy = self.selector.select(&request);
        let prompt = self.prompts.assemble(&request, &strategy)?;
        debug!(
            request_id = %request_id,
            kind = %request.transformation_type,
            template = %strategy.prompt_template_id,
            temperature = strategy.hyper_parameters.temperature,
            "strategy selected"
        );

        let max_retries = request.options.max_retries.max(1);
        let mut best: Option<Candidate> = None;

        for attempt in 0..max_retries {
            if cancel.is_cancelled() {
                return Err(TransformError::Cancelled);
            }
            if attempt > 0 {
                self.backoff(attempt).await;
            }

            let generation = GenerationRequest {
                prompt: prompt.clone(),
                hyper_parameters: strategy.hyper_parameters.clone(),
                request_id: request_id.clone(),
                transformation_type: request.transformation_type,
            };

            let response = match timeout(
                self.config.attempt_timeout,
                self.provider.generate(generation),
            )
            .await
            {
                Err(_) => {
                    debug!(request_id = %request_id, attempt, "attempt timed out, retrying");
                    continue;
                }
                Ok(Err(failure)) if failure.is_retryable() => {
                    debug!(request_id = %request_id, attempt, %failure, "retryable provider failure");
                    continue;
                }
                Ok(Err(failure)) => {
                    return Err(TransformError::Provider { failure, attempt });
                }
                Ok(Ok(response)) => response,
            };

            // Invalid output burns the attempt silently; it is never scored
            // and never surfaces to the caller.
            let output_check = self.gate.validate_output(&response.content, &request.source_text);
            if !output_check.valid {
                debug!(
                    request_id = %request_id,
                    attempt,
                    errors = ?output_check.errors,
                    "generated output rejected"
                );
                continue;
            }
            for warning in output_check.warnings.iter().chain(
                self.gate
                    .validate_by_type(&response.content, &request.source_text, request.transformation_type)
                    .warnings
                    .iter(),
            ) {
                warn!(request_id = %request_id, attempt, warning, "output warning");
            }

            let quality = self.scorer.evaluate(
                &request.source_text,
                &response.content,
                request.transformation_type,
                &request.content_analysis,
            );

            // Short-circuit on the first candidate that clears the bar.
            if quality.overall_score >= request.options.min_quality_score {
                info!(
                    request_id = %request_id,
                    attempt,
                    score = quality.overall_score,
                    "transformation succeeded"
                );
                return Ok(self.build_result(
                    &request,
                    response,
                    quality,
                    TransformOutcome::Success,
                    attempt,
                    request_id,
                    started,
                    None,
                ));
            }

            debug!(
                request_id = %request_id,
                attempt,
                score = quality.overall_score,
                threshold = request.options.min_quality_score,
                "candidate below threshold"
            );
            let better = best
                .as_ref()
                .map_or(true, |b| quality.overall_score > b.quality.overall_score);
            if better {
                best = Some(Candidate {
                    response,
                    quality,
                    attempt,
                });
            }
        }

        // Retries exhausted. A real model output below threshold beats any
        // deterministic rewrite, so best-effort wins over fallback.
        if let Some(candidate) = best {
            warn!(
                request_id = %request_id,
                score = candidate.quality.overall_score,
                threshold = request.options.min_quality_score,
                "returning best-effort candidate below threshold"
            );
            return Ok(self.build_result(
                &request,
                candidate.response,
                candidate.quality,
                TransformOutcome::BestEffort,
                candidate.attempt,
                request_id,
                started,
                None,
            ));
        }

        if request.options.fallback_to_rule_based {
            warn!(request_id = %request_id, "generative path exhausted, applying rule-based fallback");
            let content = self.fallback.rewrite(
                &request.source_text,
                request.transformation_type,
                request.target_tone,
            );
            let response = ProviderResponse {
                content,
                tokens_used: 0,
                confidence: FALLBACK_CONFIDENCE,
                model_version: FALLBACK_MODEL_VERSION.to_string(),
            };
            let note = format!(
                "rule-based fallback applied after {max_retries} failed generation attempt(s)"
            );
            return Ok(self.build_result(
                &request,
                response,
                self.fallback.quality(),
                TransformOutcome::Fallback,
                max_retries,
                request_id,
                started,
                Some(note),
            ));
        }

        Err(TransformError::QualityThresholdNotMet {
            threshold: request.options.min_quality_score,
            attempts: max_retries,
        })
    }

    /// Linear backoff with a little jitter; disabled when the base is zero
    async fn backoff(&self, attempt: u32) {
        if self.config.retry_backoff.is_zero() {
            return;
        }
        let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..50));
        tokio::time::sleep(self.config.retry_backoff * attempt + jitter).await;
    }

    #[allow(clippy::too_many_arguments)]
    fn build_result(
        &self,
        request: &TransformRequest,
        response: ProviderResponse,
        quality: QualityMetrics,
        outcome: TransformOutcome,
        retry_count: u32,
        request_id: RequestId,
        started: Instant,
        error: Option<String>,
    ) -> TransformResult {
        TransformResult {
            original_text: request.source_text.clone(),
            transformed_text: response.content,
            transformation_type: request.transformation_type,
            outcome,
            quality,
            metadata: ResultMetadata {
                request_id,
                latency_ms: started.elapsed().as_millis() as u64,
                tokens_used: response.tokens_used,
                confidence: response.confidence,
                model_version: response.model_version,
                retry_count,
                completed_at: Utc::now(),
            },
            error,
        }
    }
}
