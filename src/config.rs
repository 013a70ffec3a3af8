//! Pipeline configuration with sane defaults

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Thresholds used by the validation gate
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationLimits {
    /// Minimum input length in characters
    pub min_input_chars: usize,
    /// Inputs above this length draw a warning, not an error
    pub recommended_max_chars: usize,
    /// Maximum tolerated ratio of special characters before warning
    pub special_char_ratio: f64,
    /// Acceptable generated/original length ratio window
    pub min_length_ratio: f64,
    pub max_length_ratio: f64,
    /// Identical consecutive tokens that count as excessive repetition
    pub max_consecutive_repeats: usize,
    /// Maximum tolerated fraction of duplicated sentences
    pub max_duplicate_sentence_ratio: f64,
    /// Minimum fraction of source keywords expected in the output
    pub min_keyword_overlap: f64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_input_chars: 10,
            recommended_max_chars: 5_000,
            special_char_ratio: 0.3,
            min_length_ratio: 0.3,
            max_length_ratio: 3.0,
            max_consecutive_repeats: 3,
            max_duplicate_sentence_ratio: 0.3,
            min_keyword_overlap: 0.3,
        }
    }
}

/// Structural bounds on an assembled prompt
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PromptLimits {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for PromptLimits {
    fn default() -> Self {
        Self {
            min_chars: 20,
            max_chars: 8_000,
        }
    }
}

/// Top-level pipeline configuration
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Bound on the single suspension point per attempt (the provider call)
    pub attempt_timeout: Duration,
    /// Base delay between retries; grows linearly per attempt with jitter.
    /// Zero disables backoff entirely.
    pub retry_backoff: Duration,
    pub validation: ValidationLimits,
    pub prompt_limits: PromptLimits,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(30),
            retry_backoff: Duration::ZERO,
            validation: ValidationLimits::default(),
            prompt_limits: PromptLimits::default(),
        }
    }
}
