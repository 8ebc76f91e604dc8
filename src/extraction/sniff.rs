use super::{
    ExtractionError, HtmlExtractor, OfficeArchiveExtractor, PdfExtractor, PlainTextExtractor,
    RtfExtractor, TextExtractor, XmlExtractor,
};

const PDF_MAGIC: &[u8] = b"%PDF";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const RTF_MAGIC: &[u8] = b"{\\rtf";
const OLE_MAGIC: &[u8] = &[0xd0, 0xcf, 0x11, 0xe0, 0xa1, 0xb1, 0x1a, 0xe1];
const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

/// How far into a markup document to look for the root element
const MARKUP_HEAD_LEN: usize = 512;

/// Fallback for undeclared or unknown formats: dispatch on magic bytes
///
/// ZIP containers go to the office archive reader, which tells Word,
/// OpenDocument, PowerPoint and Excel apart by their parts. Legacy OLE
/// documents (`.doc`, `.xls`, `.ppt`) are rejected outright. Markup is
/// recognised after any BOM and leading whitespace. Anything else is decoded
/// as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct SniffingExtractor;

impl SniffingExtractor {
    fn detect(bytes: &[u8]) -> Result<&'static dyn TextExtractor, ExtractionError> {
        if bytes.starts_with(PDF_MAGIC) {
            return Ok(&PdfExtractor);
        }
        if bytes.starts_with(ZIP_MAGIC) {
            return Ok(&OfficeArchiveExtractor);
        }
        if bytes.starts_with(RTF_MAGIC) {
            return Ok(&RtfExtractor);
        }
        if bytes.starts_with(OLE_MAGIC) {
            return Err(ExtractionError::Unsupported(
                "legacy OLE compound document (.doc, .xls, .ppt)".to_string(),
            ));
        }

        let extractor: &'static dyn TextExtractor = match markup_kind(bytes) {
            Some(Markup::Html) => &HtmlExtractor,
            Some(Markup::Xml) => &XmlExtractor,
            None => &PlainTextExtractor,
        };
        Ok(extractor)
    }
}

impl TextExtractor for SniffingExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        Self::detect(bytes)?.extract(bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Markup {
    Html,
    Xml,
}

fn markup_kind(bytes: &[u8]) -> Option<Markup> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let start = body.iter().position(|b| !b.is_ascii_whitespace())?;
    let head = &body[start..body.len().min(start + MARKUP_HEAD_LEN)];
    if head.first() != Some(&b'<') {
        return None;
    }

    let head = head.to_ascii_lowercase();
    let contains = |needle: &[u8]| head.windows(needle.len()).any(|w| w == needle);

    // The HTML reader tolerates fragments and unclosed tags, the XML one does not
    if head.starts_with(b"<?xml") && !contains(b"<html") {
        Some(Markup::Xml)
    } else {
        Some(Markup::Html)
    }
}
