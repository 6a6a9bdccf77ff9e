//! Control character handling when setting a field's value.
//!
//! Line breaks of every flavor split the value into separate text-showing
//! instructions, NUL is rejected outright, and everything else passes
//! through a single literal string. Each case sets a value and then
//! verifies it by parsing the generated appearance stream back and
//! filtering for string operands.

use formfill::{parse_content_stream, Error, FormField, FormFields, Operand};

/// Parse a field's normal appearance stream and collect the shown strings.
fn strings_from_stream(field: &FormField) -> Vec<String> {
    let (ops, diagnostics) = parse_content_stream(field.normal_appearance_bytes());
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics: {diagnostics:?}"
    );
    ops.into_iter()
        .filter(|op| op.operator == "Tj")
        .flat_map(|op| op.operands)
        .filter_map(|operand| match operand {
            Operand::String(bytes) => Some(String::from_utf8(bytes).unwrap()),
            _ => None,
        })
        .collect()
}

fn field_with_value(value: &str) -> FormField {
    let mut field = FormField::new("test");
    field.set_value(value).unwrap();
    field
}

#[test]
fn character_nul() {
    let mut field = FormField::new("test");
    let err = field.set_value("NUL\0NUL").unwrap_err();
    assert!(matches!(err, Error::InvalidValue(_)));
    // No content stream was generated.
    assert!(field.normal_appearance_bytes().is_empty());
    assert_eq!(field.value(), None);
}

#[test]
fn character_nul_leaves_existing_stream_untouched() {
    let mut field = FormField::new("test");
    field.set_value("kept").unwrap();
    let before = field.normal_appearance_bytes().to_vec();

    assert!(field.set_value("NUL\0NUL").is_err());
    assert_eq!(field.normal_appearance_bytes(), before.as_slice());
    assert_eq!(field.value(), Some("kept"));
}

#[test]
fn character_tab() {
    let field = field_with_value("TAB\tTAB");
    assert_eq!(strings_from_stream(&field), vec!["TAB\tTAB"]);
}

#[test]
fn character_space() {
    let field = field_with_value("SPACE SPACE");
    assert_eq!(strings_from_stream(&field), vec!["SPACE SPACE"]);
}

#[test]
fn character_cr() {
    let field = field_with_value("CR\rCR");
    assert_eq!(strings_from_stream(&field), vec!["CR", "CR"]);
}

#[test]
fn character_lf() {
    let field = field_with_value("LF\nLF");
    assert_eq!(strings_from_stream(&field), vec!["LF", "LF"]);
}

#[test]
fn character_crlf() {
    let field = field_with_value("CRLF\r\nCRLF");
    assert_eq!(strings_from_stream(&field), vec!["CRLF", "CRLF"]);
}

#[test]
fn character_lfcr() {
    let field = field_with_value("LFCR\n\rLFCR");
    assert_eq!(strings_from_stream(&field), vec!["LFCR", "LFCR"]);
}

#[test]
fn character_unicode_linebreak() {
    let field = field_with_value("linebreak\u{2028}linebreak");
    assert_eq!(strings_from_stream(&field), vec!["linebreak", "linebreak"]);
}

#[test]
fn character_unicode_paragraphbreak() {
    let field = field_with_value("paragraphbreak\u{2029}paragraphbreak");
    assert_eq!(
        strings_from_stream(&field),
        vec!["paragraphbreak", "paragraphbreak"]
    );
}

#[test]
fn mixed_breaks_each_count_once() {
    let field = field_with_value("a\rb\nc\r\nd\n\re\u{2028}f\u{2029}g");
    assert_eq!(
        strings_from_stream(&field),
        vec!["a", "b", "c", "d", "e", "f", "g"]
    );
}

#[test]
fn segments_position_on_successive_lines() {
    let field = field_with_value("up\ndown");
    let (ops, _) = parse_content_stream(field.normal_appearance_bytes());

    // One positioning instruction per segment, the second moving down.
    let moves: Vec<Vec<f64>> = ops
        .iter()
        .filter(|op| op.operator == "Td")
        .map(|op| op.operands.iter().filter_map(Operand::as_number).collect())
        .collect();
    assert_eq!(moves.len(), 2);
    assert!(moves[1][1] < 0.0);
}

#[test]
fn registry_set_value_by_name() {
    let mut fields = FormFields::new();
    fields.add_field(FormField::new("notes"));

    fields.set_field_value("notes", "line one\nline two").unwrap();
    let field = fields.field("notes").unwrap();
    assert_eq!(strings_from_stream(field), vec!["line one", "line two"]);

    let err = fields.set_field_value("absent", "x").unwrap_err();
    assert!(matches!(err, Error::FieldNotFound(_)));
}
