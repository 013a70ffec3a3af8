//! Shared fixtures for pipeline integration tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use textmorph::{
    ContentAnalysis, GenerationProvider, GenerationRequest, ProviderFailure, ProviderResponse,
    TransformOptions, TransformRequest, TransformationType,
};

/// Two plain English sentences that sail through the input gate
pub const FOX: &str =
    "The quick brown fox jumps over the lazy dog. It crosses the wide field every single morning.";

/// Four-sentence English text for compression scenarios
pub const LONG: &str = "The quarterly report covers revenue and costs in detail. \
     Headcount grew modestly across both regional offices. \
     Customer churn stayed flat for the third straight quarter. \
     The outlook section projects steady growth through winter.";

/// A decent paraphrase of `FOX`: well-formed and keyword-preserving
pub const FOX_PARAPHRASE: &str =
    "A fast brown fox leaps over the lazy dog. Every single morning it crosses the wide field.";

/// Structurally valid output that shares no vocabulary with `FOX` and is
/// riddled with repetition and sloppy spacing; scores well below any
/// reasonable threshold
pub const FOX_POOR: &str =
    "nothing here nothing here nothing here. here nothing here nothing  here nothing";

/// Output that trips the excessive-repetition rule and never gets scored
pub const GARBAGE: &str = "aaa aaa aaa aaa aaa.";

pub fn response(content: &str) -> ProviderResponse {
    ProviderResponse {
        content: content.to_string(),
        tokens_used: 120,
        confidence: 0.9,
        model_version: "stub-model-1".to_string(),
    }
}

pub fn request(
    source: &str,
    kind: TransformationType,
    options: TransformOptions,
) -> TransformRequest {
    TransformRequest {
        source_text: source.to_string(),
        transformation_type: kind,
        content_analysis: ContentAnalysis::default(),
        target_tone: None,
        user_segment: None,
        options,
    }
}

/// Provider stub that serves a scripted sequence of outcomes, then repeats a
/// fixed outcome (or goes unavailable); counts every call it receives
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<ProviderResponse, ProviderFailure>>>,
    repeat: Option<Result<ProviderResponse, ProviderFailure>>,
    delay: Duration,
    calls: AtomicU32,
}

impl ScriptedProvider {
    pub fn from_script(script: Vec<Result<ProviderResponse, ProviderFailure>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            repeat: None,
            delay: Duration::ZERO,
            calls: AtomicU32::new(0),
        }
    }

    pub fn repeating(outcome: Result<ProviderResponse, ProviderFailure>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            repeat: Some(outcome),
            delay: Duration::ZERO,
            calls: AtomicU32::new(0),
        }
    }

    /// Simulate a slow backend; pairs with a short pipeline attempt timeout
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    async fn generate(&self, _request: GenerationRequest) -> Result<ProviderResponse, ProviderFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let mut script = self.script.lock().await;
        if let Some(outcome) = script.pop_front() {
            return outcome;
        }
        self.repeat
            .clone()
            .unwrap_or(Err(ProviderFailure::Unavailable))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
