//! Deterministic rule-based rewrites used when the generative path is exhausted

use crate::core::text;
use crate::types::{QualityMetrics, Tone, TransformationType};

/// Model tag carried by every fallback result
pub const FALLBACK_MODEL_VERSION: &str = "rule-based/v1";

/// Fixed low confidence so callers can never mistake a fallback for model output
pub const FALLBACK_CONFIDENCE: f64 = 0.2;

/// Fixed modest quality assigned to fallback results
pub const FALLBACK_SCORE: f64 = 0.5;

/// Target length fraction for the truncation-based shortening path
const TRUNCATION_RATIO: f64 = 0.6;

/// Contraction pairs: informal form first, formal form second
const FORMALITY_MARKERS: &[(&str, &str)] = &[
    ("gonna", "going to"),
    ("wanna", "want to"),
    ("gotta", "have to"),
    ("can't", "cannot"),
    ("won't", "will not"),
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("it's", "it is"),
    ("that's", "that is"),
    ("kids", "children"),
    ("a lot of", "a great deal of"),
];

/// Last-resort rewriter: sentence-boundary truncation for paraphrase-like
/// requests, lexical substitution of formality markers for tone adjustment
pub struct RuleBasedRewriter;

impl RuleBasedRewriter {
    pub fn new() -> Self {
        Self
    }

    pub fn rewrite(&self, source: &str, kind: TransformationType, target_tone: Option<Tone>) -> String {
        match kind {
            TransformationType::Compress | TransformationType::Paraphrase => {
                self.truncate_at_sentence_boundary(source)
            }
            TransformationType::ToneAdjust => {
                self.substitute_formality(source, target_tone.unwrap_or(Tone::Formal))
            }
            // No deterministic way to add content; the substitution pass at
            // least changes the surface without ever shortening the text.
            TransformationType::Expand => self.substitute_formality(source, Tone::Formal),
        }
    }

    /// Fixed modest metrics reported alongside every fallback result
    pub fn quality(&self) -> QualityMetrics {
        QualityMetrics {
            grammar_score: FALLBACK_SCORE,
            coherence_score: FALLBACK_SCORE,
            similarity_score: FALLBACK_SCORE,
            readability_score: FALLBACK_SCORE,
            diversity_score: FALLBACK_SCORE,
            overall_score: FALLBACK_SCORE,
        }
    }

    /// Keep whole leading sentences until roughly the target fraction of the
    /// original length is reached; always keeps at least one sentence
    fn truncate_at_sentence_boundary(&self, source: &str) -> String {
        let total = text::char_len(source.trim()) as f64;
        let target = total * TRUNCATION_RATIO;

        let mut kept = String::new();
        let mut current = String::new();
        for c in source.trim().chars() {
            current.push(c);
            if text::is_terminator(c) {
                if !kept.is_empty() && text::char_len(&kept) as f64 >= target {
                    break;
                }
                kept.push_str(&current);
                current.clear();
            }
        }
        if kept.is_empty() {
            // No terminator at all; fall back to the whole text
            return source.trim().to_string();
        }
        kept.trim().to_string()
    }

    fn substitute_formality(&self, source: &str, tone: Tone) -> String {
        let mut result = source.to_string();
        match tone {
            Tone::Formal | Tone::Polite => {
                for (informal, formal) in FORMALITY_MARKERS {
                    result = result.replace(informal, formal);
                }
            }
            Tone::Casual | Tone::Normal => {
                for (informal, formal) in FORMALITY_MARKERS {
                    result = result.replace(formal, informal);
                }
            }
        }
        result
    }
}

impl Default for RuleBasedRewriter {
    fn default() -> Self {
        Self::new()
    }
}
