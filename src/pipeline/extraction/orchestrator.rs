use tracing::{debug, info, warn};

use super::types::{
    ExtractionMethod, ExtractionResult, OcrEngine, PdfExtractor, PdfPageRenderer,
};
use super::ExtractionError;
use crate::document::Document;

/// Extracts plain text from one PDF document.
///
/// Fast path: read the embedded text layer. Fallback: render every page to
/// an image in a scoped temporary directory and run OCR. Backends are
/// injected as trait objects so the orchestrator runs in tests without
/// PDFium or Tesseract.
pub struct DocumentExtractor {
    pdf: Box<dyn PdfExtractor>,
    renderer: Box<dyn PdfPageRenderer>,
    ocr: Box<dyn OcrEngine>,
    language: String,
    dpi: u32,
}

impl DocumentExtractor {
    pub fn new(
        pdf: Box<dyn PdfExtractor>,
        renderer: Box<dyn PdfPageRenderer>,
        ocr: Box<dyn OcrEngine>,
        config: &crate::config::AnalysisConfig,
    ) -> Self {
        Self {
            pdf,
            renderer,
            ocr,
            language: config.ocr_language.clone(),
            dpi: config.ocr_dpi,
        }
    }

    /// Extract all text found in the document.
    ///
    /// Returns an empty-text result only if both paths yield nothing (a
    /// corrupt or blank PDF) — that is a valid outcome, not an error. The
    /// OCR fallback propagates mid-run failures; its temporary directory
    /// is removed on every exit path.
    pub fn extract(&self, document: &Document) -> Result<ExtractionResult, ExtractionError> {
        info!(document = %document.name, "Starting text extraction");

        match self.pdf.extract_pages(&document.bytes) {
            Ok(pages) => {
                let full_text = pages.concat();
                if !full_text.trim().is_empty() {
                    debug!(
                        document = %document.name,
                        pages = pages.len(),
                        chars = full_text.len(),
                        "Text layer extraction succeeded"
                    );
                    return Ok(ExtractionResult {
                        method: ExtractionMethod::PdfDirect,
                        page_count: pages.len(),
                        full_text,
                    });
                }
                debug!(
                    document = %document.name,
                    pages = pages.len(),
                    "Text layer is empty, assuming scanned document"
                );
            }
            Err(e) => {
                warn!(
                    document = %document.name,
                    error = %e,
                    "Text layer extraction failed, falling back to OCR"
                );
            }
        }

        self.extract_via_ocr(document)
    }

    fn extract_via_ocr(&self, document: &Document) -> Result<ExtractionResult, ExtractionError> {
        let page_count = match self.renderer.page_count(&document.bytes) {
            Ok(count) => count,
            Err(e) => {
                // Unreadable by both paths: surface "no text" rather than
                // an error, so a corrupt proposal doesn't crash the run.
                warn!(
                    document = %document.name,
                    error = %e,
                    "Document cannot be rendered; treating as empty"
                );
                return Ok(ExtractionResult {
                    method: ExtractionMethod::Ocr,
                    page_count: 0,
                    full_text: String::new(),
                });
            }
        };

        // Scoped render directory — removed when `tmp` drops, including on
        // the error paths below.
        let tmp = tempfile::tempdir()?;
        let mut full_text = String::new();

        for page in 0..page_count {
            let png = self.renderer.render_page(&document.bytes, page, self.dpi)?;
            let image_path = tmp.path().join(format!("page-{page:04}.png"));
            std::fs::write(&image_path, &png)?;

            let recognized = self.ocr.recognize(&image_path, &self.language)?;
            debug!(
                document = %document.name,
                page,
                chars = recognized.len(),
                "OCR page complete"
            );
            full_text.push_str(&recognized);
        }

        info!(
            document = %document.name,
            pages = page_count,
            chars = full_text.len(),
            "OCR extraction complete"
        );

        Ok(ExtractionResult {
            method: ExtractionMethod::Ocr,
            page_count,
            full_text,
        })
    }
}
