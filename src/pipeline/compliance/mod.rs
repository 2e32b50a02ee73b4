pub mod classifier;
pub mod matrix;
pub mod prompt;
pub mod types;

pub use classifier::*;
pub use matrix::*;
pub use types::*;

use thiserror::Error;

use crate::inference::InferenceError;

/// Failures during matrix construction.
///
/// A garbled-but-delivered model response is never an error (the verdict
/// parsers default it to Not Complied); this surfaces only cells whose
/// classification could not run at all, with the cell named so the caller
/// can say exactly what failed.
#[derive(Error, Debug)]
pub enum ComplianceError {
    #[error(
        "classification failed for requirement {requirement_id} ('{requirement}') \
         against proposal '{proposal}': {source}"
    )]
    Cell {
        requirement_id: usize,
        requirement: String,
        proposal: String,
        #[source]
        source: InferenceError,
    },
}
