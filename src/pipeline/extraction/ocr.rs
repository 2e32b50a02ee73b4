use std::path::Path;

use super::types::OcrEngine;
use super::ExtractionError;

/// Tesseract OCR engine.
/// Only available when compiled with the `ocr` feature flag.
#[cfg(feature = "ocr")]
pub struct TesseractOcr {
    tessdata_dir: Option<std::path::PathBuf>,
}

#[cfg(feature = "ocr")]
impl TesseractOcr {
    /// Use the system-installed tessdata.
    pub fn new() -> Self {
        Self { tessdata_dir: None }
    }

    /// Use a specific tessdata directory. The language file for the
    /// configured OCR language must exist there.
    pub fn with_tessdata(tessdata_dir: &Path) -> Result<Self, ExtractionError> {
        if !tessdata_dir.join("eng.traineddata").exists() {
            return Err(ExtractionError::TessdataNotFound(tessdata_dir.to_path_buf()));
        }
        Ok(Self {
            tessdata_dir: Some(tessdata_dir.to_path_buf()),
        })
    }
}

#[cfg(feature = "ocr")]
impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "ocr")]
impl OcrEngine for TesseractOcr {
    fn recognize(&self, image_path: &Path, lang: &str) -> Result<String, ExtractionError> {
        let datapath = match &self.tessdata_dir {
            Some(dir) => Some(
                dir.to_str()
                    .ok_or_else(|| ExtractionError::OcrInit("Invalid tessdata path".into()))?
                    .to_string(),
            ),
            None => None,
        };

        let image = image_path
            .to_str()
            .ok_or_else(|| ExtractionError::OcrInit("Invalid image path".into()))?;

        let tess = tesseract::Tesseract::new(datapath.as_deref(), Some(lang))
            .map_err(|e| ExtractionError::OcrInit(format!("{e:?}")))?;

        let mut tess = tess
            .set_image(image)
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        tess.get_text()
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))
    }
}

// ── Mock for testing ──────────────────────────────────────

use std::path::PathBuf;
use std::sync::Mutex;

/// Mock OCR engine for unit testing without Tesseract.
///
/// Returns the configured text for every page and records each image path
/// it was handed. `failing_after` makes recognition fail once that many
/// pages have succeeded — used to verify temp-dir cleanup on mid-OCR
/// errors.
pub struct MockOcrEngine {
    text: String,
    fail_after: Option<usize>,
    calls: Mutex<Vec<PathBuf>>,
}

impl MockOcrEngine {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fail_after: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail with an OCR processing error after `n` successful pages.
    pub fn failing_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    /// Image paths recognized so far, in call order.
    pub fn recognized_paths(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl OcrEngine for MockOcrEngine {
    fn recognize(&self, image_path: &Path, _lang: &str) -> Result<String, ExtractionError> {
        let mut calls = self.calls.lock().unwrap();
        if let Some(limit) = self.fail_after {
            if calls.len() >= limit {
                return Err(ExtractionError::OcrProcessing(
                    "simulated OCR failure".to_string(),
                ));
            }
        }
        calls.push(image_path.to_path_buf());
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_ocr_returns_configured_text() {
        let engine = MockOcrEngine::new("CPU: Intel i7 10th gen");
        let result = engine.recognize(Path::new("/tmp/page-0.png"), "eng").unwrap();
        assert_eq!(result, "CPU: Intel i7 10th gen");
        assert_eq!(engine.call_count(), 1);
    }

    #[test]
    fn mock_ocr_records_paths_in_order() {
        let engine = MockOcrEngine::new("text");
        engine.recognize(Path::new("a.png"), "eng").unwrap();
        engine.recognize(Path::new("b.png"), "eng").unwrap();
        assert_eq!(
            engine.recognized_paths(),
            vec![PathBuf::from("a.png"), PathBuf::from("b.png")]
        );
    }

    #[test]
    fn mock_ocr_fails_after_limit() {
        let engine = MockOcrEngine::new("text").failing_after(1);
        assert!(engine.recognize(Path::new("a.png"), "eng").is_ok());
        let err = engine.recognize(Path::new("b.png"), "eng").unwrap_err();
        assert!(matches!(err, ExtractionError::OcrProcessing(_)));
        // The failed call is not recorded as a success.
        assert_eq!(engine.call_count(), 1);
    }

    #[cfg(feature = "ocr")]
    #[test]
    fn tesseract_rejects_missing_tessdata() {
        let dir = tempfile::tempdir().unwrap();
        let result = TesseractOcr::with_tessdata(dir.path());
        assert!(matches!(result, Err(ExtractionError::TessdataNotFound(_))));
    }
}
