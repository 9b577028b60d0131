//! Shared configuration plumbing: the error type and JSON comment handling.
//!
//! The pin mapping lives in [`crate::mapping`], calibration in
//! [`crate::calibration`]. Both documents are JSON and may contain whole-line
//! `//` comments, which [`blank_comment_lines`] removes in place before
//! parsing.

/// Error type for mapping and calibration documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Document is not valid JSON/CSV, or has a value of the wrong type or size.
    #[error("malformed configuration document")]
    Malformed,
    /// A required top-level section is absent.
    #[error("missing required section `{0}`")]
    MissingSection(&'static str),
    /// The mapping names no controls at all.
    #[error("mapping defines no controls")]
    Empty,
    /// More buttons than the report has bits, or too many non-canonical names.
    #[error("too many buttons")]
    TooManyButtons,
    /// A button name or pin label does not fit its fixed-capacity buffer.
    #[error("name or label too long")]
    TooLong,
    /// Smoothing factor outside `0.0..=1.0`.
    #[error("smoothing for {0} must be within 0.0..=1.0")]
    SmoothingOutOfRange(&'static str),
}

impl From<serde_json_core::de::Error> for ConfigError {
    fn from(_: serde_json_core::de::Error) -> Self {
        ConfigError::Malformed
    }
}

/// Replace every line whose first non-blank characters are `//` with spaces.
///
/// JSON ignores whitespace, so the document keeps its byte offsets and
/// needs no second buffer.
pub fn blank_comment_lines(doc: &mut [u8]) {
    for line in doc.split_mut(|&b| b == b'\n') {
        let start = line
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(line.len());
        if line[start..].starts_with(b"//") {
            line.fill(b' ');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_comment_lines() {
        let mut doc = *b"{\n  // pins\n\"a\": 1 // trailing stays\n}";
        blank_comment_lines(&mut doc);
        let lines: [&[u8]; 4] = [b"{", b"         ", b"\"a\": 1 // trailing stays", b"}"];
        assert!(doc.split(|&b| b == b'\n').eq(lines.iter().copied()));
    }

    #[test]
    fn test_blank_comment_lines_keeps_urls_inside_values() {
        let mut doc = *b"{\"url\": \"http://x\"}";
        let before = doc;
        blank_comment_lines(&mut doc);
        assert_eq!(doc, before);
    }
}
