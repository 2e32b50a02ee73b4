//! Analysis orchestrator.
//!
//! Single entry point that drives the full run:
//! extract text (tender + proposals) → derive requirements → build the
//! compliance matrix → render/write the report.
//!
//! Uses trait-based DI for all backends (PDF, OCR, LLM) so the whole run
//! is testable with mock implementations.

use std::path::Path;

use tracing::{info, warn};

use crate::config::{AnalysisConfig, MAX_PROPOSALS};
use crate::document::Document;
use crate::inference::LlmClient;
use crate::pipeline::compliance::{ComplianceMatrix, MatrixBuilder, ProposalText};
use crate::pipeline::extraction::DocumentExtractor;
use crate::pipeline::report::{render_report, write_report, ReportOptions};
use crate::pipeline::requirements::{Requirement, RequirementExtractor};
use crate::pipeline::PipelineError;

/// Everything one analysis run produces: the requirement list and the
/// verdict grid. Summary statistics are derived from the matrix on demand
/// rather than stored.
#[derive(Debug, Clone)]
pub struct TenderAnalysis {
    pub tender_name: String,
    pub requirements: Vec<Requirement>,
    pub matrix: ComplianceMatrix,
}

/// Drives the document-to-compliance-matrix pipeline.
pub struct AnalysisPipeline {
    extractor: DocumentExtractor,
    llm: Box<dyn LlmClient>,
    config: AnalysisConfig,
}

impl AnalysisPipeline {
    pub fn new(
        extractor: DocumentExtractor,
        llm: Box<dyn LlmClient>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            extractor,
            llm,
            config,
        }
    }

    /// Check that the configured inference model is present on the
    /// backend. Callers can run this before committing to a full analysis.
    pub fn verify_model(&self) -> Result<(), crate::inference::InferenceError> {
        let model = &self.config.inference_model;
        if self.llm.is_model_available(model)? {
            Ok(())
        } else {
            Err(crate::inference::InferenceError::ModelUnavailable(
                model.clone(),
            ))
        }
    }

    /// Run the full analysis: tender + 1..=3 proposals in, matrix out.
    ///
    /// `progress` receives `(completed, total, label)` for each finished
    /// classification cell.
    ///
    /// Fails fast — before any classification work — when the tender
    /// yields no text or no requirements. A proposal that yields no text
    /// is kept: the classifier's missing-info rule turns its column into
    /// Not Complied verdicts rather than crashing the run.
    pub fn analyze(
        &self,
        tender: &Document,
        proposals: &[Document],
        progress: impl FnMut(usize, usize, &str),
    ) -> Result<TenderAnalysis, PipelineError> {
        if proposals.is_empty() {
            return Err(PipelineError::NoProposals);
        }
        if proposals.len() > MAX_PROPOSALS {
            return Err(PipelineError::TooManyProposals {
                given: proposals.len(),
                max: MAX_PROPOSALS,
            });
        }

        info!(
            tender = %tender.name,
            proposals = proposals.len(),
            "Starting tender analysis"
        );

        let tender_text = self.extract_text(tender)?;
        if tender_text.trim().is_empty() {
            return Err(PipelineError::TenderTextEmpty {
                name: tender.name.clone(),
            });
        }

        let proposal_texts = proposals
            .iter()
            .map(|proposal| {
                let text = self.extract_text(proposal)?;
                if text.trim().is_empty() {
                    warn!(
                        proposal = %proposal.name,
                        "Proposal yielded no text; its column will read Not Complied"
                    );
                }
                Ok(ProposalText::new(proposal.name.clone(), text))
            })
            .collect::<Result<Vec<_>, PipelineError>>()?;

        let requirements = RequirementExtractor::new(&self.config)
            .extract(self.llm.as_ref(), &tender_text)
            .map_err(|source| PipelineError::RequirementInference {
                name: tender.name.clone(),
                source,
            })?;
        if requirements.is_empty() {
            return Err(PipelineError::NoRequirementsFound {
                name: tender.name.clone(),
            });
        }
        log_requirement_preview(&requirements);

        let matrix = MatrixBuilder::new(&self.config).build(
            self.llm.as_ref(),
            &requirements,
            &proposal_texts,
            progress,
        )?;

        Ok(TenderAnalysis {
            tender_name: tender.name.clone(),
            requirements,
            matrix,
        })
    }

    /// Render the analysis into the report document.
    pub fn render_report(&self, analysis: &TenderAnalysis, options: &ReportOptions) -> String {
        render_report(&analysis.requirements, &analysis.matrix, options)
    }

    /// Render the analysis and write the report artifact to `path`.
    pub fn write_report(
        &self,
        analysis: &TenderAnalysis,
        options: &ReportOptions,
        path: &Path,
    ) -> Result<(), PipelineError> {
        write_report(path, &analysis.requirements, &analysis.matrix, options)?;
        Ok(())
    }

    fn extract_text(&self, document: &Document) -> Result<String, PipelineError> {
        let result =
            self.extractor
                .extract(document)
                .map_err(|source| PipelineError::Extraction {
                    name: document.name.clone(),
                    source,
                })?;
        Ok(result.full_text)
    }
}

/// Log the first few extracted requirements at info level.
fn log_requirement_preview(requirements: &[Requirement]) {
    const PREVIEW: usize = 5;
    for requirement in requirements.iter().take(PREVIEW) {
        let text: String = requirement.full_text.chars().take(80).collect();
        info!(id = requirement.id, requirement = %text, "Extracted requirement");
    }
    if requirements.len() > PREVIEW {
        info!(more = requirements.len() - PREVIEW, "Further requirements elided from log");
    }
}
