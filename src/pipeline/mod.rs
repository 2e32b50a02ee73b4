pub mod compliance;
pub mod extraction;
pub mod processor;
pub mod report;
pub mod requirements;

use thiserror::Error;

use crate::inference::InferenceError;
use crate::pipeline::compliance::ComplianceError;
use crate::pipeline::extraction::ExtractionError;
use crate::pipeline::report::ReportError;

/// Run-level failures. Each variant names the stage and the document that
/// triggered it, so callers can show a specific message instead of a
/// generic one.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("no proposal documents supplied; at least one is required for a comparison")]
    NoProposals,

    #[error("too many proposal documents: {given} supplied, maximum is {max}")]
    TooManyProposals { given: usize, max: usize },

    #[error("text extraction failed for document '{name}': {source}")]
    Extraction {
        name: String,
        #[source]
        source: ExtractionError,
    },

    #[error("no text could be extracted from tender document '{name}'; cannot derive requirements")]
    TenderTextEmpty { name: String },

    #[error("requirement extraction failed for tender '{name}': {source}")]
    RequirementInference {
        name: String,
        #[source]
        source: InferenceError,
    },

    #[error("no technical requirements found in tender document '{name}'")]
    NoRequirementsFound { name: String },

    #[error(transparent)]
    Compliance(#[from] ComplianceError),

    #[error(transparent)]
    Report(#[from] ReportError),
}
