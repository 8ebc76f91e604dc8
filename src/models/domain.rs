use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Separator between the unique prefix and the original filename of a staged upload
pub const STAGED_NAME_SEPARATOR: char = '?';

/// Closed set of document formats the extractor knows how to dispatch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    #[serde(rename = "text")]
    PlainText,
    Other,
}

impl DocumentFormat {
    /// Map a file extension (with or without the leading dot) to a format
    pub fn from_extension(extension: &str) -> Self {
        let ext = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => DocumentFormat::Pdf,
            "docx" => DocumentFormat::Docx,
            "txt" => DocumentFormat::PlainText,
            _ => DocumentFormat::Other,
        }
    }

    /// Format implied by a path's extension, `Other` when there is none
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(DocumentFormat::Other)
    }
}

/// Where the bytes of a document live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A submitted resume, ephemeral for the duration of one ranking request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReference {
    pub id: String,
    pub source: DocumentSource,
    pub format: DocumentFormat,
}

impl DocumentReference {
    /// Reference a file on disk; the path doubles as the identifier
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let format = DocumentFormat::from_path(&path);
        Self {
            id: path.to_string_lossy().into_owned(),
            source: DocumentSource::Path(path),
            format,
        }
    }

    /// Reference an in-memory document
    pub fn from_bytes(id: impl Into<String>, bytes: Vec<u8>, format: DocumentFormat) -> Self {
        Self {
            id: id.into(),
            source: DocumentSource::Bytes(bytes),
            format,
        }
    }

    /// Clean display name with any staging prefix removed
    pub fn display_name(&self) -> String {
        display_filename(&self.id)
    }
}

/// Recover the uploaded filename from a staged path or identifier
///
/// Keeps the final path component, then everything after the last
/// [`STAGED_NAME_SEPARATOR`]. Applying it to its own output is a no-op.
pub fn display_filename(id: &str) -> String {
    let base = Path::new(id)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(id);

    base.rsplit(STAGED_NAME_SEPARATOR)
        .next()
        .unwrap_or(base)
        .to_string()
}

/// Output of the extractor for one document
///
/// `text` is empty whenever `error` is set.
#[derive(Debug)]
pub struct ExtractedDocument {
    pub reference: DocumentReference,
    pub text: String,
    pub error: Option<crate::extraction::ExtractionError>,
}

impl ExtractedDocument {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// One entry of the ranked output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub filename: String,
    pub filepath: String,
    pub similarity_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension("PDF"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_extension(".docx"), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_extension("txt"), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::from_extension("doc"), DocumentFormat::Other);
        assert_eq!(DocumentFormat::from_extension(""), DocumentFormat::Other);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path("cv/Jane.Doe.PDF"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_path("README"), DocumentFormat::Other);
    }

    #[test]
    fn test_display_filename_strips_prefix() {
        let staged = "uploads/0b6c4c8e-3f43-4d0e-9d7e-1a2b3c4d5e6f?jane_doe.pdf";
        assert_eq!(display_filename(staged), "jane_doe.pdf");
    }

    #[test]
    fn test_display_filename_is_idempotent() {
        let once = display_filename("/tmp/abc?resume final.docx");
        assert_eq!(display_filename(&once), once);
        assert_eq!(display_filename("plain.txt"), "plain.txt");
    }
}
