use super::types::PdfExtractor;
use super::ExtractionError;

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers.
pub struct PdfTextExtractor;

impl PdfExtractor for PdfTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))
    }
}

/// Mock text-layer extractor returning configured page texts.
pub struct MockPdfExtractor {
    pages: Result<Vec<String>, String>,
}

impl MockPdfExtractor {
    pub fn with_pages(pages: Vec<&str>) -> Self {
        Self {
            pages: Ok(pages.into_iter().map(String::from).collect()),
        }
    }

    /// An extractor that fails the whole document, as pdf-extract does on
    /// PDFs it cannot parse.
    pub fn failing(reason: &str) -> Self {
        Self {
            pages: Err(reason.to_string()),
        }
    }
}

impl PdfExtractor for MockPdfExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        self.pages
            .clone()
            .map_err(ExtractionError::PdfParsing)
    }
}
