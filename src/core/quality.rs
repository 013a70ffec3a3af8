//! Multi-metric quality scoring for generated candidates

use std::collections::HashSet;

use crate::core::text;
use crate::types::{ComplexityLevel, ContentAnalysis, QualityMetrics, TransformationType};

/// Weighting of the five sub-scores for one transformation type.
/// Each vector sums to 1.0; `for_type` is the single lookup point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreWeights {
    pub grammar: f64,
    pub coherence: f64,
    pub similarity: f64,
    pub readability: f64,
    pub diversity: f64,
}

impl ScoreWeights {
    /// Fixed per-type weight vectors. Compression and paraphrase lean on
    /// similarity to the source; expansion leans on coherence and diversity.
    pub const fn for_type(kind: TransformationType) -> Self {
        match kind {
            TransformationType::Paraphrase => Self {
                grammar: 0.20,
                coherence: 0.20,
                similarity: 0.35,
                readability: 0.15,
                diversity: 0.10,
            },
            TransformationType::ToneAdjust => Self {
                grammar: 0.25,
                coherence: 0.25,
                similarity: 0.20,
                readability: 0.20,
                diversity: 0.10,
            },
            TransformationType::Expand => Self {
                grammar: 0.20,
                coherence: 0.30,
                similarity: 0.15,
                readability: 0.15,
                diversity: 0.20,
            },
            TransformationType::Compress => Self {
                grammar: 0.20,
                coherence: 0.20,
                similarity: 0.40,
                readability: 0.15,
                diversity: 0.05,
            },
        }
    }

    pub fn sum(&self) -> f64 {
        self.grammar + self.coherence + self.similarity + self.readability + self.diversity
    }
}

/// Stateless scorer; every computation depends only on the two text strings
/// and the type/context enums
pub struct QualityScorer;

impl QualityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Compute all five sub-scores and their weighted combination
    pub fn evaluate(
        &self,
        original: &str,
        generated: &str,
        kind: TransformationType,
        analysis: &ContentAnalysis,
    ) -> QualityMetrics {
        let grammar_score = self.grammar_score(generated);
        let coherence_score = self.coherence_score(generated);
        let similarity_score = self.similarity_score(original, generated);
        let readability_score = self.readability_score(generated);
        let diversity_score = self.diversity_score(generated);

        let weights = ScoreWeights::for_type(kind);
        debug_assert!((weights.sum() - 1.0).abs() < 1e-9);

        let overall_score = (grammar_score * weights.grammar
            + coherence_score * weights.coherence
            + similarity_score * weights.similarity
            + readability_score * weights.readability
            + diversity_score * weights.diversity)
            .clamp(0.0, 1.0);

        tracing::debug!(
            kind = %kind,
            genre = %analysis.genre,
            complexity = %analysis.complexity_level,
            overall = overall_score,
            "scored candidate"
        );

        QualityMetrics {
            grammar_score,
            coherence_score,
            similarity_score,
            readability_score,
            diversity_score,
            overall_score,
        }
    }

    /// Fixed additive offset for complexity-normalized comparison between
    /// results; not part of the primary evaluate path
    pub fn adjust_for_complexity(&self, score: f64, level: ComplexityLevel) -> f64 {
        let offset = match level {
            ComplexityLevel::Simple => 0.05,
            ComplexityLevel::Medium => 0.0,
            ComplexityLevel::Complex => -0.05,
        };
        (score + offset).clamp(0.0, 1.0)
    }

    /// Starts at 1.0 and is penalized for structural defects, floored at 0
    fn grammar_score(&self, generated: &str) -> f64 {
        let trimmed = generated.trim();
        let mut score: f64 = 1.0;

        if !text::ends_with_terminator(trimmed) {
            score -= 0.2;
        }
        if trimmed.contains("  ") {
            score -= 0.1;
        }
        if trimmed.matches('(').count() != trimmed.matches(')').count() {
            score -= 0.15;
        }
        if trimmed.matches('"').count() % 2 != 0 {
            score -= 0.15;
        }

        let chars: Vec<char> = trimmed.chars().collect();
        let repeated_terminators = chars
            .windows(2)
            .any(|w| text::is_terminator(w[0]) && text::is_terminator(w[1]));
        if repeated_terminators {
            score -= 0.1;
        }

        score.max(0.0)
    }

    /// Starts at 0.8, adjusted for sentence-length consistency, connective
    /// usage, and word repetition
    fn coherence_score(&self, generated: &str) -> f64 {
        let sentences = text::split_sentences(generated);
        let toks = text::tokens(generated);
        let mut score: f64 = 0.8;

        if sentences.len() >= 2 {
            let lengths: Vec<f64> = sentences
                .iter()
                .map(|s| s.split_whitespace().count() as f64)
                .collect();
            let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
            if mean > 0.0 {
                let variance =
                    lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / lengths.len() as f64;
                let relative_spread = variance.sqrt() / mean;
                score += 0.1 * (1.0 - relative_spread).clamp(0.0, 1.0);
            }
        }

        if !sentences.is_empty() {
            let connectives = toks
                .iter()
                .filter(|t| text::CONNECTIVES.contains(&t.as_str()))
                .count();
            let ratio = connectives as f64 / sentences.len() as f64;
            if (0.1..=0.5).contains(&ratio) {
                score += 0.1;
            }
        }

        if !toks.is_empty() {
            let unique: HashSet<&String> = toks.iter().collect();
            let repetition = 1.0 - unique.len() as f64 / toks.len() as f64;
            if repetition < 0.3 {
                score += 0.1;
            } else if repetition > 0.6 {
                score -= 0.2;
            }
        }

        score.clamp(0.0, 1.0)
    }

    /// Weighted blend: 50% keyword preservation, 30% sentence-count ratio,
    /// 20% character-length ratio
    fn similarity_score(&self, original: &str, generated: &str) -> f64 {
        let overlap = text::keyword_overlap(original, generated);
        let sentence_ratio = text::length_ratio(
            text::split_sentences(original).len(),
            text::split_sentences(generated).len(),
        );
        let char_ratio = text::length_ratio(text::char_len(original), text::char_len(generated));

        0.5 * overlap + 0.3 * sentence_ratio + 0.2 * char_ratio
    }

    /// Starts at 0.7, rewarded for comfortable sentence and word lengths
    fn readability_score(&self, generated: &str) -> f64 {
        let sentences = text::split_sentences(generated);
        let toks = text::tokens(generated);
        if sentences.is_empty() || toks.is_empty() {
            return 0.0;
        }

        let mut score: f64 = 0.7;

        let words_per_sentence = toks.len() as f64 / sentences.len() as f64;
        if (15.0..=30.0).contains(&words_per_sentence) {
            score += 0.15;
        } else if !(4.0..=45.0).contains(&words_per_sentence) {
            score -= 0.1;
        }

        let chars_per_word =
            toks.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / toks.len() as f64;
        if (2.0..=5.0).contains(&chars_per_word) {
            score += 0.1;
        } else if chars_per_word > 12.0 {
            score -= 0.1;
        }

        let mut short = false;
        let mut medium = false;
        let mut long = false;
        for sentence in &sentences {
            match sentence.split_whitespace().count() {
                0..=7 => short = true,
                8..=20 => medium = true,
                _ => long = true,
            }
        }
        if short && medium && long {
            score += 0.05;
        }

        score.clamp(0.0, 1.0)
    }

    /// Blend of type-token ratio, unique sentence openings, and punctuation
    /// variety
    fn diversity_score(&self, generated: &str) -> f64 {
        let toks = text::tokens(generated);
        if toks.is_empty() {
            return 0.0;
        }
        let unique: HashSet<&String> = toks.iter().collect();
        let type_token_ratio = unique.len() as f64 / toks.len() as f64;

        let sentences = text::split_sentences(generated);
        let unique_openings = if sentences.is_empty() {
            0.0
        } else {
            let leads: Vec<String> = sentences
                .iter()
                .filter_map(|s| text::tokens(s).into_iter().next())
                .collect();
            let distinct: HashSet<&String> = leads.iter().collect();
            if leads.is_empty() {
                0.0
            } else {
                distinct.len() as f64 / leads.len() as f64
            }
        };

        let marks_used = text::TRACKED_PUNCTUATION
            .iter()
            .filter(|m| generated.contains(**m))
            .count();
        let punctuation_variety = marks_used as f64 / text::TRACKED_PUNCTUATION.len() as f64;

        0.5 * type_token_ratio + 0.3 * unique_openings + 0.2 * punctuation_variety
    }
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Genre, Tone};

    fn analysis() -> ContentAnalysis {
        ContentAnalysis {
            detected_tone: Tone::Normal,
            genre: Genre::General,
            complexity_level: ComplexityLevel::Medium,
        }
    }

    const ALL_TYPES: [TransformationType; 4] = [
        TransformationType::Paraphrase,
        TransformationType::ToneAdjust,
        TransformationType::Expand,
        TransformationType::Compress,
    ];

    #[test]
    fn test_weight_vectors_sum_to_one() {
        for kind in ALL_TYPES {
            let weights = ScoreWeights::for_type(kind);
            assert!(
                (weights.sum() - 1.0).abs() < 1e-9,
                "weights for {kind} sum to {}",
                weights.sum()
            );
        }
    }

    #[test]
    fn test_self_similarity_is_maximal() {
        let scorer = QualityScorer::new();
        let texts = [
            "The pipeline retries generation until the quality threshold is satisfied.",
            "오늘 아침 공원에서 산책을 했다. 하늘은 맑고 바람은 부드러웠다.",
            "Short lines. Longer sentences with more words in them. Done.",
        ];
        for text in texts {
            for kind in ALL_TYPES {
                let metrics = scorer.evaluate(text, text, kind, &analysis());
                assert!(
                    metrics.similarity_score > 0.999,
                    "self-similarity dropped to {} for {text:?}",
                    metrics.similarity_score
                );
            }
        }
    }

    #[test]
    fn test_overall_score_stays_in_unit_interval() {
        let scorer = QualityScorer::new();
        let weird_inputs = [
            "",
            " ",
            ".",
            "!!!???...",
            "(((((unbalanced \" everywhere",
            "word",
            "a a a a a a a a a a a a a a a a.",
            "Normal text with a full sentence in it. And another one after it.",
            &"x".repeat(10_000),
            &"Sentence after sentence. ".repeat(500),
        ];
        for original in weird_inputs {
            for generated in weird_inputs {
                for kind in ALL_TYPES {
                    let m = scorer.evaluate(original, generated, kind, &analysis());
                    for score in [
                        m.grammar_score,
                        m.coherence_score,
                        m.similarity_score,
                        m.readability_score,
                        m.diversity_score,
                        m.overall_score,
                    ] {
                        assert!((0.0..=1.0).contains(&score), "score {score} out of range");
                    }
                }
            }
        }
    }

    #[test]
    fn test_grammar_penalties_accumulate() {
        let scorer = QualityScorer::new();
        let clean = scorer.grammar_score("A clean sentence ends properly.");
        assert_eq!(clean, 1.0);

        let sloppy = scorer.grammar_score("Missing ending with  double space (and unbalanced");
        assert!(sloppy < 0.6, "expected stacked penalties, got {sloppy}");
    }

    #[test]
    fn test_repeated_terminal_punctuation_is_penalized() {
        let scorer = QualityScorer::new();
        let single = scorer.grammar_score("A sentence that ends once.");
        let doubled = scorer.grammar_score("A sentence that ends twice!!");
        assert!(doubled < single);
    }

    #[test]
    fn test_high_word_repetition_hurts_coherence() {
        let scorer = QualityScorer::new();
        let varied = scorer.coherence_score(
            "The garden bloomed early this spring. Bright flowers covered every path outside.",
        );
        let repetitive =
            scorer.coherence_score("again here again here again. here again here again here.");
        assert!(varied > repetitive);
    }

    #[test]
    fn test_connectives_reward_coherence() {
        let scorer = QualityScorer::new();
        let with_connectives = scorer.coherence_score(
            "The experiment failed at first. However, the second run worked. We shipped it after that.",
        );
        let without = scorer.coherence_score(
            "The experiment failed at first. The second run worked. We shipped it eventually now.",
        );
        assert!(with_connectives >= without);
    }

    #[test]
    fn test_diversity_prefers_varied_vocabulary() {
        let scorer = QualityScorer::new();
        let varied = scorer
            .diversity_score("Bright mornings invite long walks; quiet evenings reward patient readers, truly.");
        let flat = scorer.diversity_score("same same words same words same. same words same words same.");
        assert!(varied > flat);
    }

    #[test]
    fn test_adjust_for_complexity_offsets_and_clamps() {
        let scorer = QualityScorer::new();
        assert!((scorer.adjust_for_complexity(0.5, ComplexityLevel::Simple) - 0.55).abs() < 1e-9);
        assert!((scorer.adjust_for_complexity(0.5, ComplexityLevel::Medium) - 0.5).abs() < 1e-9);
        assert!((scorer.adjust_for_complexity(0.5, ComplexityLevel::Complex) - 0.45).abs() < 1e-9);
        assert_eq!(scorer.adjust_for_complexity(0.98, ComplexityLevel::Simple), 1.0);
        assert_eq!(scorer.adjust_for_complexity(0.02, ComplexityLevel::Complex), 0.0);
    }
}
