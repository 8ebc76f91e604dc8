use quick_xml::events::Event;
use quick_xml::Reader;

use super::{ExtractionError, TextExtractor};

/// Line width handed to html2text; wide enough that it never wraps mid-sentence
const HTML_WRAP_WIDTH: usize = 10_000;

/// HTML rendered to plain text, tags and scripts dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExtractor;

impl TextExtractor for HtmlExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let text = html2text::from_read(bytes, HTML_WRAP_WIDTH)?;
        Ok(text.trim().to_string())
    }
}

/// Generic XML: character data only, every element boundary becomes a space
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlExtractor;

impl TextExtractor for XmlExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let xml = String::from_utf8(bytes.to_vec())?;
        xml_text(&xml, ElementBreaks::Every)
    }
}

/// Which elements separate words in the extracted text
#[derive(Debug, Clone, Copy)]
pub(crate) enum ElementBreaks {
    Every,
    /// Matched on the local name, so `text:p` and `a:p` both match `p`
    Named(&'static [&'static [u8]]),
}

impl ElementBreaks {
    fn matches(self, local_name: &[u8]) -> bool {
        match self {
            ElementBreaks::Every => true,
            ElementBreaks::Named(names) => names.contains(&local_name),
        }
    }
}

/// Collect the character data of an XML document
///
/// Text inside one element is concatenated as-is, so runs that split a word
/// stay joined. A space is emitted at each boundary `breaks` selects.
pub(crate) fn xml_text(xml: &str, breaks: ElementBreaks) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(|e| ExtractionError::Xml(e.to_string()))?;
                out.push_str(&text);
            }
            Ok(Event::CData(t)) => out.push_str(&String::from_utf8_lossy(&t.into_inner())),
            Ok(Event::Start(_)) => {
                if matches!(breaks, ElementBreaks::Every) {
                    out.push(' ');
                }
            }
            Ok(Event::End(e)) => {
                if breaks.matches(e.local_name().as_ref()) {
                    out.push(' ');
                }
            }
            Ok(Event::Empty(e)) => {
                if breaks.matches(e.local_name().as_ref()) {
                    out.push(' ');
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractionError::Xml(format!(
                    "at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }

    Ok(out.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_tags_stripped() {
        let html = b"<html><head><title>CV</title></head><body><p>Python engineer</p><p>Kafka</p></body></html>";
        let text = HtmlExtractor.extract(html).unwrap();
        assert!(text.contains("Python engineer"));
        assert!(text.contains("Kafka"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_html_entities_decoded() {
        let text = HtmlExtractor.extract(b"<p>R&amp;D lead</p>").unwrap();
        assert_eq!(text, "R&D lead");
    }

    #[test]
    fn test_xml_every_element_separates() {
        let xml = br#"<?xml version="1.0"?><cv><name>Jane</name><skill>Rust</skill><skill>Go &amp; C</skill></cv>"#;
        let text = XmlExtractor.extract(xml).unwrap();
        let words: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(words, vec!["Jane", "Rust", "Go", "&", "C"]);
    }

    #[test]
    fn test_named_breaks_keep_runs_joined() {
        const PARAGRAPHS: &[&[u8]] = &[b"p"];
        let xml = r#"<doc xmlns:t="urn:t"><t:p><t:span>Py</t:span><t:span>thon</t:span></t:p><t:p>SQL</t:p></doc>"#;
        let text = xml_text(xml, ElementBreaks::Named(PARAGRAPHS)).unwrap();
        assert_eq!(text, "Python SQL");
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            XmlExtractor.extract(b"<a><b></a>"),
            Err(ExtractionError::Xml(_))
        ));
    }
}
