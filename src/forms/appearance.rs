//! Appearance stream generation for text fields
//!
//! Builds the widget's normal appearance content stream from a field value.
//! Each text segment becomes its own text-showing instruction on its own
//! line, which is what lets a verifier recover the logical lines as
//! distinct string tokens even though line-break characters never survive
//! as literal bytes.

use crate::text::normalize::TextValue;

/// Layout knobs for generated appearance streams.
///
/// The vertical offset between successive lines is a rendering policy, not
/// part of the round-trip contract; the default leading matches the
/// `/Helv 12 Tf` default-appearance convention.
#[derive(Debug, Clone)]
pub struct AppearanceOptions {
    /// Vertical advance per line, in text space units.
    pub leading: f64,
    /// Horizontal inset of the first glyph from the widget edge.
    pub x_offset: f64,
    /// Baseline offset of the first line.
    pub y_offset: f64,
}

impl Default for AppearanceOptions {
    fn default() -> Self {
        Self {
            leading: 14.4,
            x_offset: 2.0,
            y_offset: 2.0,
        }
    }
}

/// Build the normal appearance stream for a field value.
///
/// The stream carries the marked-content framing text field producers emit:
/// `/Tx BMC` … `EMC` around a saved graphics state and a text object, with
/// the field's default appearance string applied before the first glyph.
pub fn build_appearance_stream(
    value: &TextValue,
    default_appearance: &str,
    options: &AppearanceOptions,
) -> Vec<u8> {
    let mut stream = Vec::new();
    stream.extend_from_slice(b"/Tx BMC\nq\nBT\n");
    stream.extend_from_slice(default_appearance.as_bytes());
    stream.push(b'\n');

    for (index, segment) in value.segments().iter().enumerate() {
        if index == 0 {
            stream.extend_from_slice(
                format!("{} {} Td\n", options.x_offset, options.y_offset).as_bytes(),
            );
        } else {
            stream.extend_from_slice(format!("0 {} Td\n", -options.leading).as_bytes());
        }
        stream.extend_from_slice(&segment.encode());
        stream.extend_from_slice(b" Tj\n");
    }

    stream.extend_from_slice(b"ET\nQ\nEMC\n");
    stream
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_content_stream, Operand};

    const DEFAULT_DA: &str = "/Helv 12 Tf 0 g";

    fn build(value: &str) -> Vec<u8> {
        let value = TextValue::new(value).unwrap();
        build_appearance_stream(&value, DEFAULT_DA, &AppearanceOptions::default())
    }

    #[test]
    fn test_stream_framing() {
        let stream = build("hello");
        let text = String::from_utf8(stream).unwrap();
        assert!(text.starts_with("/Tx BMC\nq\nBT\n/Helv 12 Tf 0 g\n"));
        assert!(text.ends_with("ET\nQ\nEMC\n"));
        assert!(text.contains("(hello) Tj\n"));
    }

    #[test]
    fn test_one_instruction_per_segment() {
        let stream = build("a\rb\nc");
        let (ops, diagnostics) = parse_content_stream(&stream);
        assert!(diagnostics.is_empty());
        let texts: Vec<Vec<u8>> = ops
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first())
            .filter_map(|operand| operand.as_string_bytes().map(<[u8]>::to_vec))
            .collect();
        assert_eq!(texts, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn test_line_positioning_uses_leading() {
        let value = TextValue::new("x\ny").unwrap();
        let options = AppearanceOptions {
            leading: 10.0,
            ..AppearanceOptions::default()
        };
        let stream = build_appearance_stream(&value, DEFAULT_DA, &options);
        let (ops, _) = parse_content_stream(&stream);
        let moves: Vec<Vec<f64>> = ops
            .iter()
            .filter(|op| op.operator == "Td")
            .map(|op| op.operands.iter().filter_map(Operand::as_number).collect())
            .collect();
        assert_eq!(moves, vec![vec![2.0, 2.0], vec![0.0, -10.0]]);
    }

    #[test]
    fn test_default_options() {
        let options = AppearanceOptions::default();
        assert_eq!(options.leading, 14.4);
        assert_eq!(options.x_offset, 2.0);
        assert_eq!(options.y_offset, 2.0);
    }
}
