//! Decoding helpers for declarative text members.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Why a text member could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("content has no json body")]
    NoJsonBody,

    #[error("content is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("malformed json: {0}")]
    MalformedJson(String),
}

/// Decode a member as UTF-8, verbatim.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str, TextError> {
    std::str::from_utf8(bytes).map_err(|e| TextError::InvalidUtf8(e.to_string()))
}

/// Locate the JSON body by skipping everything before the first `{`.
///
/// Catalog manifests may be preceded by a byte-order mark or other
/// preamble bytes.
pub fn extract_json_body(bytes: &[u8]) -> Result<&str, TextError> {
    let start = bytes
        .iter()
        .position(|&b| b == b'{')
        .ok_or(TextError::NoJsonBody)?;

    decode_utf8(&bytes[start..])
}

/// Remove a leading byte-order mark.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Shallow well-formedness check: the text (BOM ignored) must parse as JSON.
pub fn check_json(text: &str) -> Result<(), TextError> {
    serde_json::from_str::<serde_json::Value>(strip_bom(text))
        .map(|_| ())
        .map_err(|e| TextError::MalformedJson(e.to_string()))
}

fn line_break() -> &'static Regex {
    static LINE_BREAK: OnceLock<Regex> = OnceLock::new();
    LINE_BREAK.get_or_init(|| Regex::new(r"\r\n|\r|\n").expect("line break pattern is valid"))
}

/// Split gear spawn text into records on `\r\n`, `\r` or `\n`.
///
/// Empty records are kept so record indexes match source line numbers.
pub fn split_records(text: &str) -> Vec<String> {
    line_break().split(text).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_body_skips_preamble() {
        let bytes = b"\xef\xbb\xbf{\"m_InternalIds\":[]}";
        assert_eq!(extract_json_body(bytes).unwrap(), "{\"m_InternalIds\":[]}");
    }

    #[test]
    fn test_extract_json_body_without_brace() {
        assert_eq!(extract_json_body(b"[1, 2]"), Err(TextError::NoJsonBody));
    }

    #[test]
    fn test_extract_json_body_invalid_utf8() {
        let bytes = b"{\"a\": \"\xff\"}";
        assert!(matches!(
            extract_json_body(bytes),
            Err(TextError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_check_json_ignores_bom() {
        assert!(check_json("\u{feff}{\"Name\": \"x\"}").is_ok());
        assert!(matches!(
            check_json("{\"Name\": "),
            Err(TextError::MalformedJson(_))
        ));
    }

    #[test]
    fn test_split_records_mixed_line_endings() {
        let records = split_records("a\r\nb\rc\nd");
        assert_eq!(records, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_split_records_keeps_blank_lines() {
        let records = split_records("a\n\nb\n");
        assert_eq!(records, vec!["a", "", "b", ""]);
    }
}
