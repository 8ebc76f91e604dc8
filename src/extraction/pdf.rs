use super::{ExtractionError, TextExtractor};

/// PDF text extraction, pages joined with a single space in page order
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

        Ok(pages.join(" "))
    }
}
