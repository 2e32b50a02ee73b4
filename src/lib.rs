//! Tendermatch — tender document comparison pipeline.
//!
//! Takes a tender document and up to three competing firm proposals (PDFs),
//! extracts the tender's technical requirements via a local LLM, classifies
//! each proposal's compliance requirement-by-requirement, and renders the
//! resulting compliance matrix into a LaTeX report.
//!
//! The crate is a library: file upload UIs, report typesetting to PDF, and
//! CLI packaging live with the caller. Backends (PDF rendering, OCR, the
//! inference model) sit behind traits so the whole pipeline runs in tests
//! against mocks.

pub mod config;
pub mod document;
pub mod inference;
pub mod pipeline;

pub use config::AnalysisConfig;
pub use document::Document;
pub use inference::{InferenceError, LlmClient, OllamaClient};
pub use pipeline::processor::{AnalysisPipeline, TenderAnalysis};
pub use pipeline::PipelineError;
