//! Validation gate guarding input text and generated candidates

use regex::Regex;
use std::collections::HashMap;

use crate::config::ValidationLimits;
use crate::core::text;
use crate::types::{TransformationType, ValidationResult};

/// Per-type length expectations, as fractions of the original length
const EXPAND_MIN_GROWTH: f64 = 1.2;
const COMPRESS_MAX_RATIO: f64 = 0.6;
const PARAPHRASE_MIN_CHANGE: f64 = 0.15;

/// Pure structural checks over input and candidate output text
pub struct ValidationGate {
    limits: ValidationLimits,
    sentence_re: Regex,
}

impl ValidationGate {
    pub fn new(limits: ValidationLimits) -> Self {
        // A sentence-like substring: a run of five or more non-terminator
        // characters followed by a terminator.
        let sentence_re = Regex::new(r"[^.!?]{5,}[.!?]").unwrap();
        Self { limits, sentence_re }
    }

    /// Check source text before any provider call is made
    pub fn validate_input(&self, text: &str) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let trimmed = text.trim();

        if trimmed.is_empty() {
            result.add_error("text is empty or whitespace-only");
            return result;
        }

        let char_count = text::char_len(trimmed);
        if char_count < self.limits.min_input_chars {
            result.add_error(format!(
                "text is too short: {} characters (minimum {})",
                char_count, self.limits.min_input_chars
            ));
        }

        if !self.sentence_re.is_match(trimmed) {
            result.add_error("no sentence-like structure found");
        }

        if char_count > self.limits.recommended_max_chars {
            result.add_warning(format!(
                "text exceeds recommended maximum of {} characters",
                self.limits.recommended_max_chars
            ));
        }

        let special = trimmed
            .chars()
            .filter(|c| !c.is_alphanumeric() && !c.is_whitespace() && !text::is_terminator(*c))
            .count();
        let non_whitespace = trimmed.chars().filter(|c| !c.is_whitespace()).count().max(1);
        let special_ratio = special as f64 / non_whitespace as f64;
        if special_ratio > self.limits.special_char_ratio {
            result.add_warning(format!(
                "special character ratio {special_ratio:.2} exceeds {}",
                self.limits.special_char_ratio
            ));
        }

        result
    }

    /// Check a generated candidate against the original text
    pub fn validate_output(&self, generated: &str, original: &str) -> ValidationResult {
        let mut result = self.validate_input(generated);

        let generated_len = text::char_len(generated.trim());
        let original_len = text::char_len(original.trim()).max(1);
        let ratio = generated_len as f64 / original_len as f64;
        if ratio < self.limits.min_length_ratio || ratio > self.limits.max_length_ratio {
            result.add_error(format!(
                "length ratio {ratio:.2} outside [{}, {}]",
                self.limits.min_length_ratio, self.limits.max_length_ratio
            ));
        }

        if self.has_consecutive_repeats(generated) {
            result.add_error(format!(
                "excessive repetition: {} or more identical consecutive tokens",
                self.limits.max_consecutive_repeats
            ));
        }

        let duplicate_ratio = self.duplicate_sentence_ratio(generated);
        if duplicate_ratio > self.limits.max_duplicate_sentence_ratio {
            result.add_error(format!(
                "excessive repetition: {:.0}% of sentences are duplicates",
                duplicate_ratio * 100.0
            ));
        }

        if !text::ends_with_terminator(generated) {
            result.add_warning("generated text does not end with sentence-terminal punctuation");
        }

        let overlap = text::keyword_overlap(original, generated);
        if overlap < self.limits.min_keyword_overlap {
            result.add_warning(format!(
                "only {:.0}% of source keywords preserved",
                overlap * 100.0
            ));
        }

        result
    }

    /// Warn when the length change is inconsistent with the transformation
    /// type; never fails outright
    pub fn validate_by_type(
        &self,
        generated: &str,
        original: &str,
        kind: TransformationType,
    ) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let generated_len = text::char_len(generated.trim());
        let original_len = text::char_len(original.trim()).max(1);
        let ratio = generated_len as f64 / original_len as f64;

        match kind {
            TransformationType::Expand if ratio < EXPAND_MIN_GROWTH => {
                result.add_warning(format!(
                    "expansion effect minimal: length ratio {ratio:.2}, expected at least {EXPAND_MIN_GROWTH:.2}"
                ));
            }
            TransformationType::Compress if ratio > COMPRESS_MAX_RATIO => {
                result.add_warning(format!(
                    "compression effect minimal: length ratio {ratio:.2}, expected at most {COMPRESS_MAX_RATIO:.2}"
                ));
            }
            TransformationType::Paraphrase if (ratio - 1.0).abs() <= PARAPHRASE_MIN_CHANGE => {
                result.add_warning(format!(
                    "paraphrase changed length by only {:.0}%",
                    (ratio - 1.0).abs() * 100.0
                ));
            }
            _ => {}
        }

        result
    }

    fn has_consecutive_repeats(&self, text_in: &str) -> bool {
        let toks = text::tokens(text_in);
        toks.windows(self.limits.max_consecutive_repeats)
            .any(|w| w.iter().all(|t| *t == w[0]))
    }

    fn duplicate_sentence_ratio(&self, text_in: &str) -> f64 {
        let sentences = text::split_sentences(text_in);
        if sentences.is_empty() {
            return 0.0;
        }
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for sentence in &sentences {
            *counts.entry(*sentence).or_insert(0) += 1;
        }
        // Every member of a duplicated group counts: one repeated pair among
        // four sentences means half the text is duplicated.
        let duplicated = sentences
            .iter()
            .filter(|s| counts.get(*s).is_some_and(|c| *c > 1))
            .count();
        duplicated as f64 / sentences.len() as f64
    }
}

impl Default for ValidationGate {
    fn default() -> Self {
        Self::new(ValidationLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> ValidationGate {
        ValidationGate::default()
    }

    #[test]
    fn test_valid_input_passes() {
        let result = gate().validate_input("This is a perfectly reasonable sentence.");
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_empty_and_whitespace_input_fail() {
        assert!(!gate().validate_input("").valid);
        assert!(!gate().validate_input("   \n\t ").valid);
    }

    #[test]
    fn test_short_input_fails() {
        let result = gate().validate_input("Tiny.");
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("too short")));
    }

    #[test]
    fn test_input_without_sentence_structure_fails() {
        let result = gate().validate_input("just some words with no ending");
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("sentence")));
    }

    #[test]
    fn test_overlong_input_warns_but_passes() {
        let long = "A sentence that repeats itself endlessly. ".repeat(200);
        let result = gate().validate_input(&long);
        assert!(result.valid);
        assert!(result.warnings.iter().any(|w| w.contains("recommended maximum")));
    }

    #[test]
    fn test_special_character_ratio_warns() {
        let result = gate().validate_input("@#$%^&*()!! strange @@## markup $$%% here.");
        assert!(result.warnings.iter().any(|w| w.contains("special character")));
    }

    #[test]
    fn test_empty_generated_output_fails() {
        let result = gate().validate_output("", "A normal original sentence sits right here.");
        assert!(!result.valid);
    }

    #[test]
    fn test_length_ratio_out_of_bounds_fails() {
        let original = "A normal original sentence sits right here.";
        let tiny = "Too small.";
        let result = gate().validate_output(tiny, original);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("length ratio")));
    }

    #[test]
    fn test_consecutive_repeated_tokens_fail() {
        let original = "A normal original sentence sits right here today.";
        let result = gate().validate_output("Bad output spam spam spam inside this sentence.", original);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("repetition")));
    }

    #[test]
    fn test_duplicate_sentences_fail() {
        let original = "One original line of text. Another original line of text. A third line again.";
        let generated = "Same sentence here again. Same sentence here again. Same sentence here again.";
        let result = gate().validate_output(generated, original);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("duplicates")));
    }

    #[test]
    fn test_one_duplicated_pair_among_four_sentences_fails() {
        let original = "Four different sentences sit in the original text here. Each one is \
                        unique. Nothing repeats at all. The closing line wraps it up.";
        // Both members of the repeated pair count, so half the text is
        // duplicated.
        let generated = "The first point stands alone. A repeated closing line here. \
                         Another different middle point. A repeated closing line here.";
        let result = gate().validate_output(generated, original);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("duplicates")));
    }

    #[test]
    fn test_special_ratio_is_not_diluted_by_whitespace() {
        let padded = "@@  ##  $$  %%  ^^  &&  a tiny note sits here.";
        let result = gate().validate_input(padded);
        assert!(result.warnings.iter().any(|w| w.contains("special character")));
    }

    #[test]
    fn test_missing_terminal_punctuation_warns() {
        let original = "A normal original sentence sits right here.";
        let generated = "A fine reworded sentence sits here. But this trails off";
        let result = gate().validate_output(generated, original);
        assert!(result.valid);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("sentence-terminal punctuation")));
    }

    #[test]
    fn test_low_keyword_overlap_warns() {
        let original = "The pipeline retries generation until quality thresholds are satisfied.";
        let generated = "Completely unrelated words about gardens and weather fill this line.";
        let result = gate().validate_output(generated, original);
        assert!(result.warnings.iter().any(|w| w.contains("keywords")));
    }

    #[test]
    fn test_minimal_compression_warns_without_failing() {
        // 40-character original, 38-character output: ratio 0.95
        let original = "This original has exactly forty chars.."; // close enough in chars
        let generated = "This shortened one is barely smaller."; // ratio well above 0.6
        let result = gate().validate_by_type(generated, original, TransformationType::Compress);
        assert!(result.valid);
        assert!(result.warnings.iter().any(|w| w.contains("compression effect minimal")));
    }

    #[test]
    fn test_effective_compression_is_silent() {
        let original = "A fairly long original sentence that says quite a lot of things in many words.";
        let generated = "A short version of it.";
        let result = gate().validate_by_type(generated, original, TransformationType::Compress);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_weak_expansion_warns() {
        let original = "A fairly long original sentence that says a few things.";
        let generated = "A fairly long original sentence that says few things too.";
        let result = gate().validate_by_type(generated, original, TransformationType::Expand);
        assert!(result.warnings.iter().any(|w| w.contains("expansion effect minimal")));
    }

    #[test]
    fn test_paraphrase_with_unchanged_length_warns() {
        let original = "The weather today is cold and windy outside.";
        let generated = "Today the weather is windy and cold outside.";
        let result = gate().validate_by_type(generated, original, TransformationType::Paraphrase);
        assert!(result.warnings.iter().any(|w| w.contains("paraphrase")));
    }
}
