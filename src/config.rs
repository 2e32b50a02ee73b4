use serde::{Deserialize, Serialize};

use crate::pipeline::compliance::{CellFailurePolicy, VerdictFormat, VerdictStrictness};

/// Maximum number of firm proposals accepted per analysis run.
pub const MAX_PROPOSALS: usize = 3;

/// Default Ollama endpoint for local inference.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default inference model for requirement extraction and compliance checks.
pub const DEFAULT_MODEL: &str = "mistral:7b";

/// Default rendering DPI for the OCR fallback.
/// 300 DPI is the accuracy/speed balance point for Tesseract on office documents.
pub const DEFAULT_OCR_DPI: u32 = 300;

/// Settings for one analysis run.
///
/// Every knob the pipeline consults lives here — nothing is read from
/// globals or the environment at run time, so two runs with the same
/// config and the same backend responses produce the same report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Model identifier passed to the inference backend.
    pub inference_model: String,
    /// Tesseract language code for the OCR fallback (e.g. "eng").
    pub ocr_language: String,
    /// Page rendering resolution for the OCR fallback.
    pub ocr_dpi: u32,
    /// When true, requirements are extracted with the nine-token category
    /// taxonomy and the report groups rows by category.
    pub category_mode: bool,
    /// Response shape requested from the classifier: a bare verdict token,
    /// or a STATUS/REASON pair carried into the report.
    pub verdict_format: VerdictFormat,
    /// How tolerant verdict parsing is of off-format responses.
    pub verdict_strictness: VerdictStrictness,
    /// What happens when a single classification call fails outright.
    pub cell_failure_policy: CellFailurePolicy,
    /// Base URL of the Ollama instance.
    pub ollama_base_url: String,
    /// Per-request timeout for inference calls, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            inference_model: DEFAULT_MODEL.to_string(),
            ocr_language: "eng".to_string(),
            ocr_dpi: DEFAULT_OCR_DPI,
            category_mode: false,
            verdict_format: VerdictFormat::Terse,
            verdict_strictness: VerdictStrictness::Lenient,
            cell_failure_policy: CellFailurePolicy::MarkNotComplied,
            ollama_base_url: DEFAULT_OLLAMA_URL.to_string(),
            request_timeout_secs: 300,
        }
    }
}

impl AnalysisConfig {
    /// Categorized extraction with reasoned verdicts — the configuration
    /// used for full reports with category grouping and reason columns.
    pub fn categorized() -> Self {
        Self {
            category_mode: true,
            verdict_format: VerdictFormat::Structured,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_terse_and_lenient() {
        let config = AnalysisConfig::default();
        assert_eq!(config.inference_model, "mistral:7b");
        assert_eq!(config.ocr_language, "eng");
        assert_eq!(config.ocr_dpi, 300);
        assert!(!config.category_mode);
        assert_eq!(config.verdict_format, VerdictFormat::Terse);
        assert_eq!(config.verdict_strictness, VerdictStrictness::Lenient);
    }

    #[test]
    fn categorized_config_enables_structured_verdicts() {
        let config = AnalysisConfig::categorized();
        assert!(config.category_mode);
        assert_eq!(config.verdict_format, VerdictFormat::Structured);
        // Everything else stays at the defaults.
        assert_eq!(config.ollama_base_url, DEFAULT_OLLAMA_URL);
    }

    #[test]
    fn proposal_cap_is_three() {
        assert_eq!(MAX_PROPOSALS, 3);
    }
}
