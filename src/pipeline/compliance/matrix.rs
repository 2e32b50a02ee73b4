use tracing::{info, warn};

use super::classifier::ComplianceClassifier;
use super::types::{
    CellFailurePolicy, ComplianceMatrix, ComplianceStatus, ComplianceVerdict, MatrixRow,
    ProposalText,
};
use super::ComplianceError;
use crate::inference::LlmClient;
use crate::pipeline::requirements::Requirement;

/// Builds the requirement × proposal verdict grid.
///
/// Cells are independent — no verdict depends on another — so execution
/// order is free. The builder runs them sequentially, which is the safe
/// default for a single-tenant inference backend; row order always follows
/// requirement order and column order follows proposal order regardless.
pub struct MatrixBuilder {
    classifier: ComplianceClassifier,
    failure_policy: CellFailurePolicy,
}

impl MatrixBuilder {
    pub fn new(config: &crate::config::AnalysisConfig) -> Self {
        Self {
            classifier: ComplianceClassifier::new(config),
            failure_policy: config.cell_failure_policy,
        }
    }

    /// Classify every requirement against every proposal.
    ///
    /// `progress` is called after each completed cell with
    /// `(completed, total, label)`; completed increases monotonically up to
    /// `requirements.len() * proposals.len()`.
    ///
    /// A cell whose classification call fails is handled per the
    /// configured policy: abort naming the cell, or record Not Complied
    /// with the failure as its reason and continue. Either way the outcome
    /// is explicit, never a silently missing cell.
    pub fn build(
        &self,
        llm: &dyn LlmClient,
        requirements: &[Requirement],
        proposals: &[ProposalText],
        mut progress: impl FnMut(usize, usize, &str),
    ) -> Result<ComplianceMatrix, ComplianceError> {
        let total = requirements.len() * proposals.len();
        let mut completed = 0usize;

        info!(
            requirements = requirements.len(),
            proposals = proposals.len(),
            cells = total,
            "Building compliance matrix"
        );

        let mut rows = Vec::with_capacity(requirements.len());
        for requirement in requirements {
            let mut verdicts = Vec::with_capacity(proposals.len());
            for (proposal_index, proposal) in proposals.iter().enumerate() {
                let (status, reason) =
                    match self.classifier.classify(llm, requirement, &proposal.text) {
                        Ok(outcome) => outcome,
                        Err(source) => match self.failure_policy {
                            CellFailurePolicy::FailFast => {
                                return Err(ComplianceError::Cell {
                                    requirement_id: requirement.id,
                                    requirement: requirement.full_text.clone(),
                                    proposal: proposal.name.clone(),
                                    source,
                                });
                            }
                            CellFailurePolicy::MarkNotComplied => {
                                warn!(
                                    requirement = requirement.id,
                                    proposal = %proposal.name,
                                    error = %source,
                                    "Cell classification failed, marked Not Complied"
                                );
                                (
                                    ComplianceStatus::NotComplied,
                                    Some(format!("classification failed: {source}")),
                                )
                            }
                        },
                    };

                verdicts.push(ComplianceVerdict {
                    requirement_id: requirement.id,
                    proposal_index,
                    status,
                    reason,
                });

                completed += 1;
                let label = format!(
                    "Evaluating {} for requirement {}/{}",
                    proposal.name,
                    requirement.id + 1,
                    requirements.len()
                );
                progress(completed, total, &label);
            }
            rows.push(MatrixRow {
                requirement_id: requirement.id,
                verdicts,
            });
        }

        info!(cells = total, "Compliance matrix complete");
        Ok(ComplianceMatrix {
            proposal_names: proposals.iter().map(|p| p.name.clone()).collect(),
            rows,
        })
    }
}
