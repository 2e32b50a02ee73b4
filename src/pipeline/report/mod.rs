pub mod document;
pub mod escape;
pub mod table;

pub use document::*;
pub use escape::*;
pub use table::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
