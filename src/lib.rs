//! # formfill
//!
//! PDF form field text values and the content stream parsing needed to
//! verify them.
//!
//! Setting a field value is a one-way trip through two layers: the
//! control-character policy splits the value into line-break-free segments
//! (rejecting NUL outright), and the string literal codec encodes each
//! segment into its own text-showing instruction in the widget's normal
//! appearance stream. The content stream parser makes the trip reversible:
//! it re-reads the generated stream and recovers each logical line as a
//! distinct string token.
//!
//! Parsing is best-effort by design. Content streams in the wild are often
//! produced by imperfect tools, so malformed input yields diagnostics next
//! to a partial result instead of an error.
//!
//! ## Example
//!
//! ```rust
//! use formfill::{parse_content_stream, FormField, Operand};
//!
//! # fn main() -> formfill::Result<()> {
//! let mut field = FormField::new("notes");
//! field.set_value("first line\r\nsecond line")?;
//!
//! let (ops, diagnostics) = parse_content_stream(field.normal_appearance_bytes());
//! assert!(diagnostics.is_empty());
//!
//! let lines: Vec<String> = ops
//!     .iter()
//!     .filter(|op| op.operator == "Tj")
//!     .filter_map(|op| op.operands.first())
//!     .filter_map(|operand| match operand {
//!         Operand::String(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
//!         _ => None,
//!     })
//!     .collect();
//! assert_eq!(lines, ["first line", "second line"]);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod forms;
pub mod parser;
pub mod text;

pub use error::{Error, Result};
pub use forms::{AppearanceOptions, FieldFlags, FormField, FormFields};
pub use parser::{parse_content_stream, ContentOp, Diagnostic, LexError, Operand, Token};
pub use text::{encode_text_value, TextSegment, TextValue};

/// Current version of formfill
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_public_surface_round_trip() {
        let value = TextValue::new("a\u{2028}b").unwrap();
        let tokens = encode_text_value(&value);
        assert_eq!(tokens.len(), 2);

        let mut stream = Vec::new();
        for token in &tokens {
            stream.extend_from_slice(token);
            stream.extend_from_slice(b" Tj\n");
        }
        let (ops, diagnostics) = parse_content_stream(&stream);
        assert!(diagnostics.is_empty());
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].operands, vec![Operand::String(b"a".to_vec())]);
        assert_eq!(ops[1].operands, vec![Operand::String(b"b".to_vec())]);
    }
}
