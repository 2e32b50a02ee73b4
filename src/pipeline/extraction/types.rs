use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ExtractionError;

/// Result of text extraction from a single document.
///
/// An empty `full_text` is a valid outcome (blank or unreadable PDF),
/// not an error — callers decide whether "no text" is fatal for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub method: ExtractionMethod,
    pub page_count: usize,
    pub full_text: String,
}

impl ExtractionResult {
    /// True when neither path produced any non-whitespace text.
    pub fn is_empty(&self) -> bool {
        self.full_text.trim().is_empty()
    }
}

/// How text was extracted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExtractionMethod {
    /// Text layer read directly from the PDF.
    PdfDirect,
    /// Pages rendered to images and recognized with OCR.
    Ocr,
}

/// PDF text-layer extraction abstraction.
pub trait PdfExtractor: Send + Sync {
    /// Per-page text, in page order. A page without extractable text
    /// contributes an empty string rather than failing the document.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// PDF page-image rendering abstraction for the OCR fallback.
pub trait PdfPageRenderer: Send + Sync {
    fn page_count(&self, pdf_bytes: &[u8]) -> Result<usize, ExtractionError>;

    /// Render one page (0-based) to PNG bytes at the given DPI.
    fn render_page(
        &self,
        pdf_bytes: &[u8],
        page_number: usize,
        dpi: u32,
    ) -> Result<Vec<u8>, ExtractionError>;
}

/// OCR engine abstraction (allows mocking for tests).
pub trait OcrEngine: Send + Sync {
    /// Recognize text in a page image on disk with the given language model.
    fn recognize(&self, image_path: &Path, lang: &str) -> Result<String, ExtractionError>;
}

// Shared backends: an `Arc`'d implementation is itself an implementation,
// so one renderer/engine can serve several extractors.

impl<T: PdfExtractor + ?Sized> PdfExtractor for std::sync::Arc<T> {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        (**self).extract_pages(pdf_bytes)
    }
}

impl<T: PdfPageRenderer + ?Sized> PdfPageRenderer for std::sync::Arc<T> {
    fn page_count(&self, pdf_bytes: &[u8]) -> Result<usize, ExtractionError> {
        (**self).page_count(pdf_bytes)
    }

    fn render_page(
        &self,
        pdf_bytes: &[u8],
        page_number: usize,
        dpi: u32,
    ) -> Result<Vec<u8>, ExtractionError> {
        (**self).render_page(pdf_bytes, page_number, dpi)
    }
}

impl<T: OcrEngine + ?Sized> OcrEngine for std::sync::Arc<T> {
    fn recognize(&self, image_path: &Path, lang: &str) -> Result<String, ExtractionError> {
        (**self).recognize(image_path, lang)
    }
}
