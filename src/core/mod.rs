//! Pure pipeline building blocks: validation, scoring, strategy, prompts

pub mod fallback;
pub mod optimizer;
pub mod prompt;
pub mod quality;
pub mod strategy;
pub mod text;
pub mod validation;
