pub mod ollama;
pub mod types;

pub use ollama::*;
pub use types::*;

use thiserror::Error;

/// Failures reaching or decoding the inference backend.
///
/// These all mean the classification or extraction call never produced a
/// usable answer — distinct from a garbled-but-delivered response, which
/// the verdict parsers resolve to a conservative default instead.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("inference backend is not reachable at {0}")]
    Connection(String),

    #[error("inference request timed out after {0}s")]
    Timeout(u64),

    #[error("inference backend returned error (status {status}): {body}")]
    Backend { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("response deserialization failed: {0}")]
    ResponseParsing(String),

    #[error("model '{0}' is not available on the inference backend")]
    ModelUnavailable(String),
}
