//! Prompt template registry, assembly, and structural validation

use std::collections::HashMap;

use crate::config::PromptLimits;
use crate::error::{PipelineResult, TransformError};
use crate::types::{TransformRequest, TransformationStrategy};

/// Replaceable template data keyed by template id. Placeholders:
/// `{source_text}`, `{target_tone}`, `{detected_tone}`, `{genre}`.
pub struct PromptLibrary {
    templates: HashMap<String, String>,
    limits: PromptLimits,
}

impl PromptLibrary {
    /// Library preloaded with the default template per transformation type
    pub fn new(limits: PromptLimits) -> Self {
        let mut templates = HashMap::new();
        templates.insert(
            "paraphrase/v1".to_string(),
            "Rewrite the following {genre} text in different words while keeping its meaning \
             intact. Keep the length similar.\n\n{source_text}"
                .to_string(),
        );
        templates.insert(
            "tone_adjust/v1".to_string(),
            "Rewrite the following text in a {target_tone} tone. The current tone reads as \
             {detected_tone}. Preserve the meaning exactly.\n\n{source_text}"
                .to_string(),
        );
        templates.insert(
            "expand/v1".to_string(),
            "Expand the following {genre} text with additional detail and explanation, growing \
             it by at least twenty percent.\n\n{source_text}"
                .to_string(),
        );
        templates.insert(
            "compress/v1".to_string(),
            "Condense the following text to well under two thirds of its length while keeping \
             every key point.\n\n{source_text}"
                .to_string(),
        );
        Self { templates, limits }
    }

    /// Register or replace a template
    pub fn with_template(mut self, id: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(id.into(), template.into());
        self
    }

    /// Fill the strategy's template from the request and check the result's
    /// structural well-formedness; failures indicate a template defect and
    /// are non-retryable
    pub fn assemble(
        &self,
        request: &TransformRequest,
        strategy: &TransformationStrategy,
    ) -> PipelineResult<String> {
        let template = self.templates.get(&strategy.prompt_template_id).ok_or_else(|| {
            TransformError::InvalidPrompt {
                message: format!("unknown template id: {}", strategy.prompt_template_id),
            }
        })?;

        let target_tone = request
            .target_tone
            .unwrap_or(request.content_analysis.detected_tone);
        let prompt = template
            .replace("{source_text}", &request.source_text)
            .replace("{target_tone}", target_tone.as_str())
            .replace("{detected_tone}", request.content_analysis.detected_tone.as_str())
            .replace("{genre}", request.content_analysis.genre.as_str());

        self.check_structure(&prompt)?;
        Ok(prompt)
    }

    fn check_structure(&self, prompt: &str) -> PipelineResult<()> {
        let trimmed = prompt.trim();
        if trimmed.is_empty() {
            return Err(TransformError::InvalidPrompt {
                message: "assembled prompt is empty".to_string(),
            });
        }
        let chars = trimmed.chars().count();
        if chars < self.limits.min_chars || chars > self.limits.max_chars {
            return Err(TransformError::InvalidPrompt {
                message: format!(
                    "assembled prompt length {chars} outside [{}, {}]",
                    self.limits.min_chars, self.limits.max_chars
                ),
            });
        }
        Ok(())
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::new(PromptLimits::default())
    }
}
