//! Control-character policy for field text values
//!
//! Maps an application-level string onto line-break-free segments. Line
//! breaks are represented structurally, by starting a new text-showing
//! instruction per segment, never by embedding raw break bytes in a string
//! literal. NUL cannot be represented safely in the literal-string grammar
//! alongside C-style consumers of the decoded bytes, so it is rejected when
//! the value is constructed rather than stripped or mis-encoded later.

use crate::error::{Error, Result};
use crate::text::literal;

pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';

/// A validated field text value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextValue(String);

impl TextValue {
    /// Validate and wrap a value. Fails with [`Error::InvalidValue`] when
    /// the value contains NUL.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.contains('\0') {
            return Err(Error::InvalidValue(
                "value contains a NUL character".to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into line-break-free segments.
    ///
    /// Each of CR, LF, CRLF, LFCR, U+2028 and U+2029 counts as exactly one
    /// break, so a value with k breaks yields k+1 segments in original
    /// order. TAB, SPACE and all other non-breaking characters pass through
    /// unchanged inside a segment.
    pub fn segments(&self) -> Vec<TextSegment> {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = self.0.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    segments.push(TextSegment(std::mem::take(&mut current)));
                }
                '\n' => {
                    if chars.peek() == Some(&'\r') {
                        chars.next();
                    }
                    segments.push(TextSegment(std::mem::take(&mut current)));
                }
                LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {
                    segments.push(TextSegment(std::mem::take(&mut current)));
                }
                _ => current.push(ch),
            }
        }

        segments.push(TextSegment(current));
        segments
    }
}

/// One line-break-free run of a field value, the atomic unit placed into a
/// single text-showing instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment(String);

impl TextSegment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encode this segment as a literal string token.
    pub fn encode(&self) -> Vec<u8> {
        literal::encode_literal(self.0.as_bytes())
    }
}

/// Encode a value as one literal string token per segment.
pub fn encode_text_value(value: &TextValue) -> Vec<Vec<u8>> {
    value.segments().iter().map(TextSegment::encode).collect()
}
