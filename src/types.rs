//! Core data model for transformation requests and results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a single pipeline invocation
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Requested rewriting operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformationType {
    Paraphrase,
    ToneAdjust,
    Expand,
    Compress,
}

impl TransformationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformationType::Paraphrase => "paraphrase",
            TransformationType::ToneAdjust => "tone_adjust",
            TransformationType::Expand => "expand",
            TransformationType::Compress => "compress",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "paraphrase" => Some(TransformationType::Paraphrase),
            "tone_adjust" => Some(TransformationType::ToneAdjust),
            "expand" => Some(TransformationType::Expand),
            "compress" => Some(TransformationType::Compress),
            _ => None,
        }
    }
}

impl fmt::Display for TransformationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Register of a text, either detected by the upstream analyzer or requested
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Formal,
    Casual,
    Normal,
    Polite,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Casual => "casual",
            Tone::Normal => "normal",
            Tone::Polite => "polite",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Genre classification supplied by the upstream content analyzer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    Narrative,
    Descriptive,
    Informative,
    Persuasive,
    General,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Narrative => "narrative",
            Genre::Descriptive => "descriptive",
            Genre::Informative => "informative",
            Genre::Persuasive => "persuasive",
            Genre::General => "general",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Content difficulty classification supplied by the upstream analyzer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Simple,
    Medium,
    Complex,
}

impl ComplexityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityLevel::Simple => "simple",
            ComplexityLevel::Medium => "medium",
            ComplexityLevel::Complex => "complex",
        }
    }
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of the external content analyzer; never recomputed by this crate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub detected_tone: Tone,
    pub genre: Genre,
    pub complexity_level: ComplexityLevel,
}

impl Default for ContentAnalysis {
    fn default() -> Self {
        Self {
            detected_tone: Tone::Normal,
            genre: Genre::General,
            complexity_level: ComplexityLevel::Medium,
        }
    }
}

/// Retry and quality knobs for a single transformation request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Upper bound on provider attempts (at least 1)
    pub max_retries: u32,
    /// Minimum overall score for a result to count as a genuine success
    pub min_quality_score: f64,
    /// Allow the deterministic rule-based rewrite when generation is exhausted
    pub fallback_to_rule_based: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            max_retries: 3,
            min_quality_score: 0.7,
            fallback_to_rule_based: true,
        }
    }
}

/// A single transformation request; immutable once constructed
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransformRequest {
    pub source_text: String,
    pub transformation_type: TransformationType,
    pub content_analysis: ContentAnalysis,
    pub target_tone: Option<Tone>,
    pub user_segment: Option<String>,
    pub options: TransformOptions,
}

/// Generation hyperparameters, produced fresh per attempt and never shared
/// across requests
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HyperParameters {
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: Option<f64>,
    pub presence_penalty: Option<f64>,
}

/// Hyperparameters plus prompt template reference for one transformation type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformationStrategy {
    pub transformation_type: TransformationType,
    pub hyper_parameters: HyperParameters,
    pub prompt_template_id: String,
}

/// Five quality sub-scores and their weighted combination, all in [0, 1]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub grammar_score: f64,
    pub coherence_score: f64,
    pub similarity_score: f64,
    pub readability_score: f64,
    pub diversity_score: f64,
    pub overall_score: f64,
}

/// Terminal state of a completed pipeline invocation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformOutcome {
    /// Overall score met the requested threshold
    Success,
    /// Retries exhausted; highest-scoring structurally valid candidate returned
    BestEffort,
    /// No valid candidate at all; deterministic rule-based rewrite returned
    Fallback,
}

/// Telemetry attached to every returned result
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub request_id: RequestId,
    pub latency_ms: u64,
    pub tokens_used: u32,
    pub confidence: f64,
    pub model_version: String,
    /// 0-based attempt index that produced the returned text; a rule-based
    /// fallback reports `max_retries` since every generative attempt was spent
    pub retry_count: u32,
    pub completed_at: DateTime<Utc>,
}

/// Final product of one pipeline invocation; immutable once produced
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransformResult {
    pub original_text: String,
    pub transformed_text: String,
    pub transformation_type: TransformationType,
    pub outcome: TransformOutcome,
    pub quality: QualityMetrics,
    pub metadata: ResultMetadata,
    pub error: Option<String>,
}

impl TransformResult {
    /// True only when the threshold was genuinely met; best-effort and
    /// fallback results always return false
    pub fn is_genuine_success(&self) -> bool {
        matches!(self.outcome, TransformOutcome::Success)
    }
}

/// Transient result of a single validation check
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Fold another check into this one; errors from either side invalidate
    pub fn merge(&mut self, other: ValidationResult) {
        self.valid = self.valid && other.valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Response returned by a generation provider for one attempt
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub content: String,
    pub tokens_used: u32,
    pub confidence: f64,
    pub model_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transformation_type_round_trip() {
        for kind in [
            TransformationType::Paraphrase,
            TransformationType::ToneAdjust,
            TransformationType::Expand,
            TransformationType::Compress,
        ] {
            assert_eq!(TransformationType::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(TransformationType::from_str("summarize"), None);
    }

    #[test]
    fn test_validation_result_merge() {
        let mut first = ValidationResult::ok();
        first.add_warning("long text");

        let mut second = ValidationResult::ok();
        second.add_error("too short");

        first.merge(second);
        assert!(!first.valid);
        assert_eq!(first.errors.len(), 1);
        assert_eq!(first.warnings.len(), 1);
    }

    #[test]
    fn test_fallback_outcome_is_not_success() {
        let result = TransformResult {
            original_text: "a".to_string(),
            transformed_text: "b".to_string(),
            transformation_type: TransformationType::Paraphrase,
            outcome: TransformOutcome::Fallback,
            quality: QualityMetrics {
                grammar_score: 0.5,
                coherence_score: 0.5,
                similarity_score: 0.5,
                readability_score: 0.5,
                diversity_score: 0.5,
                overall_score: 0.5,
            },
            metadata: ResultMetadata {
                request_id: RequestId::new(),
                latency_ms: 0,
                tokens_used: 0,
                confidence: 0.2,
                model_version: "rule-based/v1".to_string(),
                retry_count: 3,
                completed_at: Utc::now(),
            },
            error: Some("fallback".to_string()),
        };
        assert!(!result.is_genuine_success());
    }
}
