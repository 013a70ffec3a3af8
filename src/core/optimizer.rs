//! Rolling performance history used to recommend strategies empirically

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::strategy::StrategySelector;
use crate::types::{ComplexityLevel, Genre, TransformRequest, TransformationStrategy, TransformationType};

/// Average reported for keys with no recorded history
pub const NEUTRAL_PERFORMANCE: f64 = 0.75;

/// Entries retained per key; oldest evicted first
const HISTORY_CAP: usize = 10;

/// Identifies the operating context a strategy's scores are bucketed under
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StrategyKey {
    pub transformation_type: TransformationType,
    pub genre: Genre,
    pub complexity: ComplexityLevel,
}

impl StrategyKey {
    pub fn from_request(request: &TransformRequest) -> Self {
        Self {
            transformation_type: request.transformation_type,
            genre: request.content_analysis.genre,
            complexity: request.content_analysis.complexity_level,
        }
    }
}

impl fmt::Display for StrategyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.transformation_type, self.genre, self.complexity
        )
    }
}

/// Tracks per-key score history and recommends the empirically best strategy.
/// The history map is the only shared mutable state in this crate; the lock
/// keeps the bounded-history invariant intact under concurrent use.
pub struct StrategyOptimizer {
    history: Arc<RwLock<HashMap<StrategyKey, VecDeque<f64>>>>,
    selector: StrategySelector,
}

impl StrategyOptimizer {
    pub fn new() -> Self {
        Self {
            history: Arc::new(RwLock::new(HashMap::new())),
            selector: StrategySelector::new(),
        }
    }

    /// Append a score for the key, evicting the oldest entry past the cap
    pub async fn record_performance(&self, key: StrategyKey, score: f64) {
        let mut history = self.history.write().await;
        let entry = history.entry(key).or_default();
        entry.push_back(score.clamp(0.0, 1.0));
        while entry.len() > HISTORY_CAP {
            entry.pop_front();
        }
    }

    /// Mean of the retained history, or the neutral default when empty
    pub async fn average_performance(&self, key: &StrategyKey) -> f64 {
        let history = self.history.read().await;
        match history.get(key) {
            Some(scores) if !scores.is_empty() => {
                scores.iter().sum::<f64>() / scores.len() as f64
            }
            _ => NEUTRAL_PERFORMANCE,
        }
    }

    /// Number of retained entries for the key
    pub async fn history_len(&self, key: &StrategyKey) -> usize {
        let history = self.history.read().await;
        history.get(key).map_or(0, VecDeque::len)
    }

    /// Pick the candidate with the best historical average for its derived
    /// key; with no candidates, fall back to fresh selection from context
    pub async fn recommend_strategy(
        &self,
        candidates: &[TransformationStrategy],
        request: &TransformRequest,
    ) -> TransformationStrategy {
        let Some(first) = candidates.first() else {
            return self.selector.select(request);
        };

        let mut best = first.clone();
        let mut best_average = f64::NEG_INFINITY;
        for candidate in candidates {
            let key = StrategyKey {
                transformation_type: candidate.transformation_type,
                genre: request.content_analysis.genre,
                complexity: request.content_analysis.complexity_level,
            };
            let average = self.average_performance(&key).await;
            tracing::debug!(key = %key, average, "candidate strategy scored");
            if average > best_average {
                best_average = average;
                best = candidate.clone();
            }
        }
        best
    }
}

impl Default for StrategyOptimizer {
    fn default() -> Self {
        Self::new()
    }
}
