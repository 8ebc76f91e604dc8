// Office Open XML and OpenDocument files all share the ZIP magic. The package
// parts tell them apart:
//   mimetype                 OpenDocument (odt, odp, ods), text in content.xml
//   word/document.xml        Word
//   ppt/slides/slideN.xml    PowerPoint, one part per slide
//   xl/sharedStrings.xml     Excel, cell strings live in one shared table

use std::io::{Cursor, Read, Seek};

use zip::ZipArchive;

use super::markup::{xml_text, ElementBreaks};
use super::{DocxExtractor, ExtractionError, TextExtractor};

const OPENDOCUMENT_MIME_PREFIX: &str = "application/vnd.oasis.opendocument";
const SLIDE_PREFIX: &str = "ppt/slides/slide";

const ODF_BREAKS: &[&[u8]] = &[b"p", b"h", b"list-item", b"line-break", b"tab", b"s", b"table-cell"];
const DRAWINGML_BREAKS: &[&[u8]] = &[b"p", b"br", b"tab"];
const SHARED_STRING_BREAKS: &[&[u8]] = &[b"si"];

/// Which office package a ZIP archive holds
#[derive(Debug, Clone, PartialEq, Eq)]
enum OfficePackage {
    OpenDocument,
    Word,
    /// Slide part names, in slide order
    Presentation(Vec<String>),
    Workbook,
}

/// ZIP-based office documents, dispatched on the package parts present
#[derive(Debug, Clone, Copy, Default)]
pub struct OfficeArchiveExtractor;

impl TextExtractor for OfficeArchiveExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ExtractionError::Archive(e.to_string()))?;

        match identify(&mut archive)? {
            OfficePackage::Word => DocxExtractor.extract(bytes),
            OfficePackage::OpenDocument => {
                let content = read_part(&mut archive, "content.xml")?;
                xml_text(&content, ElementBreaks::Named(ODF_BREAKS))
            }
            OfficePackage::Presentation(slides) => {
                let mut texts = Vec::with_capacity(slides.len());
                for name in &slides {
                    let xml = read_part(&mut archive, name)?;
                    texts.push(xml_text(&xml, ElementBreaks::Named(DRAWINGML_BREAKS))?);
                }
                Ok(texts.join(" "))
            }
            OfficePackage::Workbook => match read_part(&mut archive, "xl/sharedStrings.xml") {
                Ok(xml) => xml_text(&xml, ElementBreaks::Named(SHARED_STRING_BREAKS)),
                // A workbook of numbers only has no string table
                Err(ExtractionError::Archive(_)) => Ok(String::new()),
                Err(e) => Err(e),
            },
        }
    }
}

fn identify<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<OfficePackage, ExtractionError> {
    if let Ok(mime) = read_part(archive, "mimetype") {
        if mime.trim().starts_with(OPENDOCUMENT_MIME_PREFIX) {
            return Ok(OfficePackage::OpenDocument);
        }
    }

    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    let has = |part: &str| names.iter().any(|n| n == part);

    if has("word/document.xml") {
        return Ok(OfficePackage::Word);
    }

    let mut slides: Vec<(u32, String)> = names
        .iter()
        .filter_map(|n| {
            let number = n.strip_prefix(SLIDE_PREFIX)?.strip_suffix(".xml")?;
            Some((number.parse().ok()?, n.clone()))
        })
        .collect();
    if !slides.is_empty() {
        slides.sort();
        return Ok(OfficePackage::Presentation(
            slides.into_iter().map(|(_, name)| name).collect(),
        ));
    }

    if has("xl/workbook.xml") {
        return Ok(OfficePackage::Workbook);
    }
    // OpenDocument without the optional mimetype entry
    if has("content.xml") && has("META-INF/manifest.xml") {
        return Ok(OfficePackage::OpenDocument);
    }

    Err(ExtractionError::Unsupported(
        "ZIP archive is not a recognised office document".to_string(),
    ))
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String, ExtractionError> {
    let mut part = archive
        .by_name(name)
        .map_err(|e| ExtractionError::Archive(format!("{name}: {e}")))?;
    let mut text = String::new();
    part.read_to_string(&mut text)?;
    Ok(text)
}
