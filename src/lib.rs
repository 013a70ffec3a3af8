//! Quality-gated text transformation pipeline
//!
//! Takes a short user-authored text plus a requested transformation
//! (paraphrase, tone adjustment, expansion, compression), drives an
//! unreliable generation backend through a bounded retry loop, scores every
//! candidate on five quality axes, and degrades gracefully: best-effort
//! candidate first, deterministic rule-based rewrite last.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod providers;
pub mod traits;
pub mod types;

// Re-export the main surface
pub use config::{PipelineConfig, PromptLimits, ValidationLimits};
pub use core::fallback::RuleBasedRewriter;
pub use core::optimizer::{StrategyKey, StrategyOptimizer, NEUTRAL_PERFORMANCE};
pub use core::prompt::PromptLibrary;
pub use core::quality::{QualityScorer, ScoreWeights};
pub use core::strategy::StrategySelector;
pub use core::validation::ValidationGate;
pub use error::{PipelineResult, ProviderFailure, TransformError};
pub use pipeline::{CancelFlag, TransformationPipeline};
pub use providers::{HttpProvider, ProviderChain};
pub use traits::{GenerationProvider, GenerationRequest, MockGenerationProvider};
pub use types::*;
