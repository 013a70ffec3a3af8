//! Strategy selection: generation hyperparameters from content context

use crate::types::{
    ComplexityLevel, Genre, HyperParameters, Tone, TransformRequest, TransformationStrategy,
    TransformationType,
};

/// Token budget bounds after contextual adjustment
const MIN_TOKENS: u32 = 100;
const MAX_TOKENS: u32 = 4_000;

/// Acceptance-threshold bounds for `adjust_quality_target`
const MIN_QUALITY_TARGET: f64 = 0.6;
const MAX_QUALITY_TARGET: f64 = 0.95;

/// Maps transformation type plus detected tone/genre/complexity to
/// generation hyperparameters; pure function of the request
pub struct StrategySelector;

impl StrategySelector {
    pub fn new() -> Self {
        Self
    }

    /// Base strategy per type with contextual nudges applied, clamped to
    /// sane hyperparameter ranges
    pub fn select(&self, request: &TransformRequest) -> TransformationStrategy {
        let base = base_strategy(request.transformation_type);
        let mut hp = base.hyper_parameters;

        match request.content_analysis.complexity_level {
            ComplexityLevel::Complex => {
                hp.temperature -= 0.1;
                hp.max_tokens = hp.max_tokens.saturating_add(300);
            }
            ComplexityLevel::Simple => {
                hp.temperature += 0.1;
                hp.max_tokens = hp.max_tokens.saturating_sub(200);
            }
            ComplexityLevel::Medium => {}
        }

        match request.content_analysis.genre {
            Genre::Narrative | Genre::Descriptive => {
                hp.temperature += 0.05;
                hp.presence_penalty = Some(hp.presence_penalty.unwrap_or(0.0) + 0.1);
            }
            Genre::Informative => {
                hp.temperature -= 0.05;
            }
            Genre::Persuasive | Genre::General => {}
        }

        // Tone adjustment pins the temperature to the requested register,
        // overriding the contextual nudges above.
        if request.transformation_type == TransformationType::ToneAdjust {
            if let Some(tone) = request.target_tone {
                hp.temperature = match tone {
                    Tone::Formal => 0.5,
                    Tone::Casual => 0.7,
                    Tone::Normal => 0.6,
                    Tone::Polite => 0.4,
                };
            }
        }

        hp.temperature = hp.temperature.clamp(0.0, 1.0);
        hp.max_tokens = hp.max_tokens.clamp(MIN_TOKENS, MAX_TOKENS);
        if let Some(penalty) = hp.presence_penalty {
            hp.presence_penalty = Some(penalty.clamp(0.0, 1.0));
        }

        TransformationStrategy {
            transformation_type: request.transformation_type,
            hyper_parameters: hp,
            prompt_template_id: base.prompt_template_id,
        }
    }

    /// Context-aware acceptance threshold for callers that want one; the
    /// pipeline itself always honors the request's threshold verbatim
    pub fn adjust_quality_target(&self, base_target: f64, request: &TransformRequest) -> f64 {
        let mut target = base_target;
        if request.content_analysis.complexity_level == ComplexityLevel::Complex {
            target -= 0.05;
        }
        if request.user_segment.as_deref() == Some("power") {
            target += 0.05;
        }
        target.clamp(MIN_QUALITY_TARGET, MAX_QUALITY_TARGET)
    }
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed base strategy table; pure data, one entry per transformation type
fn base_strategy(kind: TransformationType) -> TransformationStrategy {
    let (temperature, max_tokens, presence_penalty, template) = match kind {
        TransformationType::Paraphrase => (0.7, 1_000, 0.3, "paraphrase/v1"),
        TransformationType::ToneAdjust => (0.6, 1_000, 0.2, "tone_adjust/v1"),
        TransformationType::Expand => (0.8, 1_500, 0.4, "expand/v1"),
        TransformationType::Compress => (0.4, 600, 0.1, "compress/v1"),
    };

    TransformationStrategy {
        transformation_type: kind,
        hyper_parameters: HyperParameters {
            temperature,
            max_tokens,
            top_p: Some(0.9),
            presence_penalty: Some(presence_penalty),
        },
        prompt_template_id: template.to_string(),
    }
}
