//! Text extraction from heterogeneous resume formats.
//!
//! Each [`DocumentFormat`] has one [`TextExtractor`]. [`extract`] reads the
//! bytes, dispatches on the declared format and never fails: any error,
//! including a panicking decoder, becomes empty text plus a recorded
//! [`ExtractionError`].

pub mod docx;
pub mod markup;
pub mod office;
pub mod pdf;
pub mod plain;
pub mod rtf;
pub mod sniff;

use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

use crate::models::{DocumentFormat, DocumentReference, DocumentSource, ExtractedDocument};

pub use docx::DocxExtractor;
pub use markup::{HtmlExtractor, XmlExtractor};
pub use office::OfficeArchiveExtractor;
pub use pdf::PdfExtractor;
pub use plain::PlainTextExtractor;
pub use rtf::RtfExtractor;
pub use sniff::SniffingExtractor;

/// Errors that can occur while extracting text from a document
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("DOCX error: {0}")]
    Docx(String),

    #[error("RTF error: {0}")]
    Rtf(String),

    #[error("HTML error: {0}")]
    Html(#[from] html2text::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Unsupported format: {0}")]
    Unsupported(String),

    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Extractor panicked: {0}")]
    Panicked(String),
}

/// Format-specific text extraction capability
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

impl DocumentFormat {
    /// The extractor responsible for this format
    pub fn extractor(self) -> &'static dyn TextExtractor {
        match self {
            DocumentFormat::Pdf => &PdfExtractor,
            DocumentFormat::Docx => &DocxExtractor,
            DocumentFormat::PlainText => &PlainTextExtractor,
            DocumentFormat::Other => &SniffingExtractor,
        }
    }
}

/// Extract the raw text of a document
///
/// Errors are logged and mapped to an empty string so one bad resume never
/// aborts the batch.
pub fn extract(reference: &DocumentReference) -> ExtractedDocument {
    match try_extract(reference) {
        Ok(text) => {
            tracing::debug!("Extracted {} chars from {}", text.len(), reference.id);
            ExtractedDocument {
                reference: reference.clone(),
                text,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!("Error extracting text from {}: {}", reference.id, e);
            ExtractedDocument {
                reference: reference.clone(),
                text: String::new(),
                error: Some(e),
            }
        }
    }
}

fn try_extract(reference: &DocumentReference) -> Result<String, ExtractionError> {
    let bytes: Cow<'_, [u8]> = match &reference.source {
        DocumentSource::Path(path) => Cow::Owned(std::fs::read(path)?),
        DocumentSource::Bytes(bytes) => Cow::Borrowed(bytes.as_slice()),
    };

    run_guarded(reference.format.extractor(), &bytes)
}

/// Run an extractor, turning a panic into [`ExtractionError::Panicked`]
///
/// Third-party decoders may panic on malformed input.
fn run_guarded(extractor: &dyn TextExtractor, bytes: &[u8]) -> Result<String, ExtractionError> {
    panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(bytes)))
        .map_err(|payload| ExtractionError::Panicked(panic_message(payload.as_ref())))?
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
