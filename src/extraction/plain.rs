use super::{ExtractionError, TextExtractor};

/// UTF-8 text, returned verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim() {
        let text = PlainTextExtractor.extract("Café  Owner\n".as_bytes()).unwrap();
        assert_eq!(text, "Café  Owner\n");
    }

    #[test]
    fn test_invalid_utf8() {
        let err = PlainTextExtractor.extract(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidUtf8(_)));
    }
}
