use regex::Regex;
use tracing::{debug, warn};

use super::prompt::{
    build_compliance_prompt, STRUCTURED_COMPLIANCE_SYSTEM_PROMPT,
    TERSE_COMPLIANCE_SYSTEM_PROMPT,
};
use super::types::{ComplianceStatus, VerdictFormat, VerdictStrictness};
use crate::inference::{InferenceError, LlmClient};
use crate::pipeline::requirements::Requirement;

/// Reason recorded when a structured response carries no usable REASON line.
pub const FALLBACK_REASON: &str = "Unable to determine compliance";

/// Reduce a terse model response to a verdict.
///
/// Parsing is total: every possible response maps to a status, and every
/// off-format response maps to Not Complied. The asymmetry is deliberate —
/// a garbled answer must flag non-compliance, never hide it.
pub fn parse_terse_verdict(response: &str, strictness: VerdictStrictness) -> ComplianceStatus {
    match strictness {
        VerdictStrictness::Lenient => {
            let lower = response.to_lowercase();
            if lower.contains("complied") && !lower.contains("not") {
                ComplianceStatus::Complied
            } else {
                ComplianceStatus::NotComplied
            }
        }
        VerdictStrictness::Exact => {
            let exact = Regex::new(r"(?i)^\s*complied\s*[.!]?\s*$").unwrap();
            if exact.is_match(response) {
                ComplianceStatus::Complied
            } else {
                ComplianceStatus::NotComplied
            }
        }
    }
}

/// Extract status and reason from a structured response.
///
/// Takes the first line carrying each label. A missing STATUS line is Not
/// Complied; a missing or empty REASON line gets [`FALLBACK_REASON`].
pub fn parse_structured_verdict(
    response: &str,
    strictness: VerdictStrictness,
) -> (ComplianceStatus, String) {
    let status = match label_value(response, "STATUS:") {
        Some(value) => parse_terse_verdict(&value, strictness),
        None => ComplianceStatus::NotComplied,
    };

    let reason = label_value(response, "REASON:")
        .filter(|reason| !reason.is_empty())
        .unwrap_or_else(|| FALLBACK_REASON.to_string());

    (status, reason)
}

/// Value after the first occurrence of `label` on the first line holding it.
fn label_value(response: &str, label: &str) -> Option<String> {
    response
        .lines()
        .find(|line| line.contains(label))
        .map(|line| line.split(label).nth(1).unwrap_or("").trim().to_string())
}

/// Classifies one (requirement, proposal) pair per call.
///
/// Stateless between calls: each classification is a fresh request to the
/// backend, so verdicts cannot contaminate each other.
pub struct ComplianceClassifier {
    model: String,
    format: VerdictFormat,
    strictness: VerdictStrictness,
}

impl ComplianceClassifier {
    pub fn new(config: &crate::config::AnalysisConfig) -> Self {
        Self {
            model: config.inference_model.clone(),
            format: config.verdict_format,
            strictness: config.verdict_strictness,
        }
    }

    /// Evaluate one requirement against one proposal's text.
    ///
    /// Returns the status plus, in structured mode, the model's reason.
    /// Only transport failures surface as errors — they mean the
    /// classification never ran, which callers must treat differently from
    /// "ran and found non-compliance".
    pub fn classify(
        &self,
        llm: &dyn LlmClient,
        requirement: &Requirement,
        proposal_text: &str,
    ) -> Result<(ComplianceStatus, Option<String>), InferenceError> {
        let system = match self.format {
            VerdictFormat::Terse => TERSE_COMPLIANCE_SYSTEM_PROMPT,
            VerdictFormat::Structured => STRUCTURED_COMPLIANCE_SYSTEM_PROMPT,
        };
        let prompt = build_compliance_prompt(&requirement.full_text, proposal_text);

        let response = llm.generate(&self.model, &prompt, system)?;

        let (status, reason) = match self.format {
            VerdictFormat::Terse => {
                let trimmed = response.trim();
                if trimmed != "Complied" && trimmed != "Not Complied" {
                    warn!(
                        requirement = requirement.id,
                        response_chars = response.len(),
                        "Off-format verdict response, conservative parsing applied"
                    );
                }
                (parse_terse_verdict(&response, self.strictness), None)
            }
            VerdictFormat::Structured => {
                let (status, reason) = parse_structured_verdict(&response, self.strictness);
                if reason == FALLBACK_REASON {
                    warn!(
                        requirement = requirement.id,
                        "Structured response missing labels, defaults applied"
                    );
                }
                (status, Some(reason))
            }
        };

        debug!(
            requirement = requirement.id,
            status = %status,
            "Classification complete"
        );
        Ok((status, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::inference::MockLlmClient;
    use super::VerdictStrictness::{Exact, Lenient};

    // ── Terse parsing ──

    #[test]
    fn clean_tokens_parse_in_both_strictness_modes() {
        for strictness in [Lenient, Exact] {
            assert_eq!(
                parse_terse_verdict("Complied", strictness),
                ComplianceStatus::Complied
            );
            assert_eq!(
                parse_terse_verdict("Not Complied", strictness),
                ComplianceStatus::NotComplied
            );
        }
    }

    #[test]
    fn case_and_surrounding_whitespace_are_normalized() {
        assert_eq!(
            parse_terse_verdict("  COMPLIED \n", Lenient),
            ComplianceStatus::Complied
        );
        assert_eq!(
            parse_terse_verdict("complied.", Exact),
            ComplianceStatus::Complied
        );
    }

    #[test]
    fn garbled_responses_default_to_not_complied() {
        for garbage in ["", "yes", "maybe?", "COMPL1ED", "the spec looks fine"] {
            assert_eq!(
                parse_terse_verdict(garbage, Lenient),
                ComplianceStatus::NotComplied,
                "lenient should reject {garbage:?}"
            );
            assert_eq!(
                parse_terse_verdict(garbage, Exact),
                ComplianceStatus::NotComplied,
                "exact should reject {garbage:?}"
            );
        }
    }

    #[test]
    fn verbose_affirmative_passes_lenient_only() {
        let response = "The firm has complied with this requirement.";
        assert_eq!(
            parse_terse_verdict(response, Lenient),
            ComplianceStatus::Complied
        );
        assert_eq!(
            parse_terse_verdict(response, Exact),
            ComplianceStatus::NotComplied
        );
    }

    #[test]
    fn lenient_negation_gap_is_preserved_and_exact_closes_it() {
        // A verbose negative that avoids the substring "not" slips through
        // the lenient policy. Exact mode rejects it.
        let response = "The firm never complied with this clause";
        assert_eq!(
            parse_terse_verdict(response, Lenient),
            ComplianceStatus::Complied
        );
        assert_eq!(
            parse_terse_verdict(response, Exact),
            ComplianceStatus::NotComplied
        );
    }

    #[test]
    fn lenient_catches_embedded_negations() {
        // "cannot" contains the substring "not", so the lenient rule
        // already rejects it.
        assert_eq!(
            parse_terse_verdict("Cannot be considered complied", Lenient),
            ComplianceStatus::NotComplied
        );
    }

    // ── Structured parsing ──

    #[test]
    fn structured_response_parses_status_and_reason() {
        let response = "STATUS: Complied\nREASON: 32GB offered exceeds the 16GB minimum";
        let (status, reason) = parse_structured_verdict(response, Lenient);
        assert_eq!(status, ComplianceStatus::Complied);
        assert_eq!(reason, "32GB offered exceeds the 16GB minimum");
    }

    #[test]
    fn structured_takes_first_occurrence_of_each_label() {
        let response =
            "STATUS: Not Complied\nREASON: RAM not mentioned\nSTATUS: Complied\nREASON: ignore me";
        let (status, reason) = parse_structured_verdict(response, Lenient);
        assert_eq!(status, ComplianceStatus::NotComplied);
        assert_eq!(reason, "RAM not mentioned");
    }

    #[test]
    fn missing_status_label_defaults_to_not_complied() {
        let (status, reason) =
            parse_structured_verdict("REASON: sounds plausible", Lenient);
        assert_eq!(status, ComplianceStatus::NotComplied);
        assert_eq!(reason, "sounds plausible");
    }

    #[test]
    fn missing_reason_label_gets_fallback_reason() {
        let (status, reason) = parse_structured_verdict("STATUS: Complied", Lenient);
        assert_eq!(status, ComplianceStatus::Complied);
        assert_eq!(reason, FALLBACK_REASON);
    }

    #[test]
    fn fully_malformed_structured_response_gets_both_defaults() {
        let (status, reason) = parse_structured_verdict("I am not sure.", Lenient);
        assert_eq!(status, ComplianceStatus::NotComplied);
        assert_eq!(reason, FALLBACK_REASON);
    }

    #[test]
    fn empty_reason_value_gets_fallback_reason() {
        let (_, reason) = parse_structured_verdict("STATUS: Complied\nREASON:", Lenient);
        assert_eq!(reason, FALLBACK_REASON);
    }

    // ── Classifier ──

    fn requirement() -> Requirement {
        Requirement::plain(0, "RAM: 16GB minimum")
    }

    #[test]
    fn terse_classification_returns_status_without_reason() {
        let llm = MockLlmClient::new("Complied");
        let classifier = ComplianceClassifier::new(&AnalysisConfig::default());

        let (status, reason) = classifier
            .classify(&llm, &requirement(), "32GB DDR4 included")
            .unwrap();
        assert_eq!(status, ComplianceStatus::Complied);
        assert!(reason.is_none());
    }

    #[test]
    fn structured_classification_carries_reason_through() {
        let llm = MockLlmClient::new("STATUS: Not Complied\nREASON: RAM capacity is not mentioned");
        let classifier = ComplianceClassifier::new(&AnalysisConfig::categorized());

        let (status, reason) = classifier
            .classify(&llm, &requirement(), "A proposal that never mentions memory")
            .unwrap();
        assert_eq!(status, ComplianceStatus::NotComplied);
        assert_eq!(reason.as_deref(), Some("RAM capacity is not mentioned"));
    }

    #[test]
    fn prompt_contains_requirement_and_proposal_text() {
        let llm = MockLlmClient::new("Complied");
        let classifier = ComplianceClassifier::new(&AnalysisConfig::default());
        classifier
            .classify(&llm, &requirement(), "THE PROPOSAL BODY")
            .unwrap();

        let prompts = llm.recorded_prompts();
        assert!(prompts[0].contains("RAM: 16GB minimum"));
        assert!(prompts[0].contains("THE PROPOSAL BODY"));
    }

    #[test]
    fn malformed_response_is_a_verdict_not_an_error() {
        let llm = MockLlmClient::new("As an AI, compliance is hard to judge here.");
        let classifier = ComplianceClassifier::new(&AnalysisConfig::default());

        let (status, _) = classifier
            .classify(&llm, &requirement(), "proposal")
            .unwrap();
        assert_eq!(status, ComplianceStatus::NotComplied);
    }

    #[test]
    fn transport_failure_propagates_as_error() {
        let llm = MockLlmClient::unreachable();
        let classifier = ComplianceClassifier::new(&AnalysisConfig::default());

        let err = classifier
            .classify(&llm, &requirement(), "proposal")
            .unwrap_err();
        assert!(matches!(err, InferenceError::Connection(_)));
    }
}
