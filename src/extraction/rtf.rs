use super::{ExtractionError, TextExtractor};

/// Destinations whose content is never document text
const IGNORED_DESTINATIONS: &[&str] = &[
    "colortbl", "datastore", "fonttbl", "footer", "header", "info", "pict", "stylesheet",
    "themedata",
];

/// Plain-text rendering of a Rich Text Format document
///
/// Control words are dropped, `\par` and `\line` become newlines, `\tab` a
/// tab, and `\'hh` escapes are decoded as Latin-1.
#[derive(Debug, Clone, Copy, Default)]
pub struct RtfExtractor;

impl TextExtractor for RtfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if !bytes.starts_with(b"{\\rtf") {
            return Err(ExtractionError::Rtf("missing {\\rtf header".to_string()));
        }
        strip_rtf(bytes)
    }
}

fn strip_rtf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut out = String::new();
    // Per open group: whether its content is skipped
    let mut groups: Vec<bool> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let skipping = groups.last().copied().unwrap_or(false);
        match bytes[i] {
            b'{' => {
                groups.push(skipping);
                i += 1;
            }
            b'}' => {
                if groups.pop().is_none() {
                    return Err(ExtractionError::Rtf(format!("unbalanced '}}' at byte {i}")));
                }
                i += 1;
            }
            b'\\' => {
                i += 1;
                let Some(&next) = bytes.get(i) else { break };
                match next {
                    b'\\' | b'{' | b'}' => {
                        if !skipping {
                            out.push(next as char);
                        }
                        i += 1;
                    }
                    b'*' => {
                        if let Some(top) = groups.last_mut() {
                            *top = true;
                        }
                        i += 1;
                    }
                    b'\'' => {
                        let hex = bytes.get(i + 1..i + 3).and_then(|h| std::str::from_utf8(h).ok());
                        match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                            Some(b) => {
                                if !skipping {
                                    out.push(b as char);
                                }
                                i += 3;
                            }
                            None => return Err(ExtractionError::Rtf(format!("bad hex escape at byte {i}"))),
                        }
                    }
                    c if c.is_ascii_alphabetic() => {
                        let start = i;
                        while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                            i += 1;
                        }
                        let word = std::str::from_utf8(&bytes[start..i]).unwrap_or_default();
                        if i < bytes.len() && (bytes[i] == b'-' || bytes[i].is_ascii_digit()) {
                            i += 1;
                            while i < bytes.len() && bytes[i].is_ascii_digit() {
                                i += 1;
                            }
                        }
                        // A single space delimits the control word
                        if i < bytes.len() && bytes[i] == b' ' {
                            i += 1;
                        }

                        if IGNORED_DESTINATIONS.contains(&word) {
                            if let Some(top) = groups.last_mut() {
                                *top = true;
                            }
                        } else if !skipping {
                            match word {
                                "par" | "line" => out.push('\n'),
                                "tab" => out.push('\t'),
                                _ => {}
                            }
                        }
                    }
                    _ => {
                        // Control symbols such as \~ or \-
                        i += 1;
                    }
                }
            }
            b'\r' | b'\n' => i += 1,
            b => {
                if !skipping {
                    out.push(b as char);
                }
                i += 1;
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_control_words() {
        let rtf = br"{\rtf1\ansi{\fonttbl{\f0 Arial;}}\f0\fs24 Data Engineer\par Spark\tab SQL}";
        let text = RtfExtractor.extract(rtf).unwrap();
        assert_eq!(text, "Data Engineer\nSpark\tSQL");
    }

    #[test]
    fn test_skips_starred_destinations() {
        let rtf = br"{\rtf1{\*\generator Writer;}Backend {\b developer}}";
        assert_eq!(RtfExtractor.extract(rtf).unwrap(), "Backend developer");
    }

    #[test]
    fn test_hex_escapes() {
        let rtf = br"{\rtf1 Caf\'e9}";
        assert_eq!(RtfExtractor.extract(rtf).unwrap(), "Caf\u{e9}");
    }

    #[test]
    fn test_unbalanced_braces() {
        assert!(RtfExtractor.extract(br"{\rtf1 text}}").is_err());
    }
}
