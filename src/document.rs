use std::path::Path;

use uuid::Uuid;

/// An input PDF: opaque bytes plus the name used to label report columns.
///
/// Immutable once constructed — the pipeline reads the bytes exactly once
/// during text extraction and never writes back.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bytes,
        }
    }

    /// Read a document from disk, using the file name as the label.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }
}
