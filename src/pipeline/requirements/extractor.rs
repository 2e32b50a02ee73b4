use tracing::{debug, info};

use super::parser::parse_requirements;
use super::prompt::{
    build_requirements_prompt, CATEGORIZED_REQUIREMENTS_SYSTEM_PROMPT,
    REQUIREMENTS_SYSTEM_PROMPT,
};
use super::types::Requirement;
use crate::inference::{InferenceError, LlmClient};

/// Derives the requirement list from the tender's extracted text with one
/// inference call.
pub struct RequirementExtractor {
    model: String,
    category_mode: bool,
}

impl RequirementExtractor {
    pub fn new(config: &crate::config::AnalysisConfig) -> Self {
        Self {
            model: config.inference_model.clone(),
            category_mode: config.category_mode,
        }
    }

    /// Ask the model for the tender's requirements and parse its listing.
    ///
    /// An empty vector means the response contained no requirement lines —
    /// a valid outcome the caller must treat as "nothing to compare".
    /// Errors are transport-level only: the backend could not be asked.
    pub fn extract(
        &self,
        llm: &dyn LlmClient,
        tender_text: &str,
    ) -> Result<Vec<Requirement>, InferenceError> {
        let system = if self.category_mode {
            CATEGORIZED_REQUIREMENTS_SYSTEM_PROMPT
        } else {
            REQUIREMENTS_SYSTEM_PROMPT
        };
        let prompt = build_requirements_prompt(tender_text);

        debug!(
            model = %self.model,
            category_mode = self.category_mode,
            tender_chars = tender_text.len(),
            "Requesting requirement extraction"
        );
        let response = llm.generate(&self.model, &prompt, system)?;

        let requirements = parse_requirements(&response, self.category_mode);
        info!(
            count = requirements.len(),
            "Requirement extraction complete"
        );
        Ok(requirements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::inference::MockLlmClient;

    #[test]
    fn extracts_and_parses_model_listing() {
        let llm = MockLlmClient::new("- CPU: Intel i7 10th gen\n- RAM: 16GB minimum");
        let extractor = RequirementExtractor::new(&AnalysisConfig::default());

        let reqs = extractor.extract(&llm, "tender body").unwrap();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].description, "CPU");
        assert_eq!(llm.call_count(), 1);
    }

    #[test]
    fn tender_text_is_embedded_in_the_prompt() {
        let llm = MockLlmClient::new("- CPU: i7");
        let extractor = RequirementExtractor::new(&AnalysisConfig::default());
        extractor.extract(&llm, "UNIQUE TENDER BODY").unwrap();

        let prompts = llm.recorded_prompts();
        assert!(prompts[0].contains("UNIQUE TENDER BODY"));
    }

    #[test]
    fn category_mode_uses_categorized_grammar() {
        let llm = MockLlmClient::new("HARDWARE: Processor: Intel i7");
        let extractor = RequirementExtractor::new(&AnalysisConfig::categorized());

        let reqs = extractor.extract(&llm, "tender").unwrap();
        assert_eq!(reqs.len(), 1);
        assert_eq!(
            reqs[0].category,
            crate::pipeline::requirements::RequirementCategory::Hardware
        );
    }

    #[test]
    fn listing_without_requirements_yields_empty_ok() {
        let llm = MockLlmClient::new("I could not find any technical requirements.");
        let extractor = RequirementExtractor::new(&AnalysisConfig::default());

        let reqs = extractor.extract(&llm, "tender").unwrap();
        assert!(reqs.is_empty());
    }

    #[test]
    fn backend_failure_propagates() {
        let llm = MockLlmClient::unreachable();
        let extractor = RequirementExtractor::new(&AnalysisConfig::default());

        let err = extractor.extract(&llm, "tender").unwrap_err();
        assert!(matches!(err, InferenceError::Connection(_)));
    }
}
