//! Shared text utilities: sentence splitting, tokenization, keyword extraction

use std::collections::HashSet;

/// Characters that terminate a sentence
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Punctuation marks tracked by the diversity sub-score
pub const TRACKED_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

/// Transition words counted by the coherence sub-score
pub(crate) const CONNECTIVES: &[&str] = &[
    "however",
    "therefore",
    "moreover",
    "furthermore",
    "also",
    "but",
    "and",
    "then",
    "thus",
    "meanwhile",
    "instead",
    "finally",
    "because",
    "although",
    "additionally",
    "consequently",
    "still",
    "yet",
];

pub fn is_terminator(c: char) -> bool {
    SENTENCE_TERMINATORS.contains(&c)
}

/// Split into trimmed, non-empty sentence fragments (terminators dropped)
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(is_terminator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lowercased tokens with edge punctuation stripped
pub fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Salient tokens of the text: anything non-trivial (two or more characters)
pub fn keywords(text: &str) -> HashSet<String> {
    tokens(text)
        .into_iter()
        .filter(|w| w.chars().count() >= 2)
        .collect()
}

/// Fraction of the original's keywords that reappear in the generated text.
/// A keyword-free original trivially counts as fully preserved.
pub fn keyword_overlap(original: &str, generated: &str) -> f64 {
    let source = keywords(original);
    if source.is_empty() {
        return 1.0;
    }
    let target = keywords(generated);
    let preserved = source.iter().filter(|k| target.contains(*k)).count();
    preserved as f64 / source.len() as f64
}

pub fn ends_with_terminator(text: &str) -> bool {
    text.trim_end().chars().last().is_some_and(is_terminator)
}

/// Character count, not byte length; inputs may be CJK
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// min/max ratio of two lengths, in [0, 1]
pub fn length_ratio(a: usize, b: usize) -> f64 {
    match (a, b) {
        (0, 0) => 1.0,
        (0, _) | (_, 0) => 0.0,
        (a, b) => a.min(b) as f64 / a.max(b) as f64,
    }
}
