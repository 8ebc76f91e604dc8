// A .docx file is a ZIP archive of XML parts; docx-rs gives a typed tree:
//   Document -> Paragraph -> Run -> Text
// Only top-level body paragraphs are read. Tables, headers and images are not.

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};

use super::{ExtractionError, TextExtractor};

/// Word document extraction, paragraphs joined with a single space
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| ExtractionError::Docx(format!("{e:?}")))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
                _ => None,
            })
            .collect();

        Ok(paragraphs.join(" "))
    }
}

/// Concatenate the runs of one paragraph
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();

    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                match rc {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    RunChild::Break(_) => text.push('\n'),
                    _ => {}
                }
            }
        }
    }

    text
}
