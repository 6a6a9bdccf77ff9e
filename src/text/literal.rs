//! String literal codec
//!
//! Encoding and decoding of the literal-string and hex-string grammar from
//! ISO 32000-1 Section 7.3.4. The lexer decodes string tokens through the
//! same functions used here, so anything the encoder produces always lexes
//! back to the original bytes.

/// Encode raw bytes as a literal string token, including the delimiting
/// parentheses.
///
/// `(`, `)` and `\` are backslash-escaped. Every byte below 0x20 is escaped
/// as well: LF, CR, TAB, BS and FF get their named escapes, everything else a
/// three-digit octal escape. CR in particular must never be emitted raw,
/// since readers normalize raw line endings inside literals to LF. The
/// output is deterministic and never uses line-continuation escapes.
pub fn encode_literal(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 2);
    out.push(b'(');
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(byte);
            }
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            b'\x08' => out.extend_from_slice(b"\\b"),
            b'\x0C' => out.extend_from_slice(b"\\f"),
            byte if byte < 0x20 => {
                out.push(b'\\');
                out.extend_from_slice(format!("{byte:03o}").as_bytes());
            }
            byte => out.push(byte),
        }
    }
    out.push(b')');
    out
}

/// Decode the bytes between the outer parentheses of a literal string token.
///
/// Recognized escapes are `\n \r \t \b \f \( \) \\` and one to three octal
/// digits (values above 255 truncate to the low 8 bits). A backslash
/// followed by CR, LF or CRLF is a line continuation and contributes
/// nothing. Any other escaped byte decodes to itself. An unescaped raw CR
/// or CRLF normalizes to a single LF. Nested parentheses pass through as
/// ordinary bytes.
pub fn decode_literal(inner: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(inner.len());
    let mut i = 0;
    while i < inner.len() {
        let byte = inner[i];
        if byte == b'\\' {
            i += 1;
            let Some(&next) = inner.get(i) else {
                break;
            };
            match next {
                b'n' => {
                    out.push(b'\n');
                    i += 1;
                }
                b'r' => {
                    out.push(b'\r');
                    i += 1;
                }
                b't' => {
                    out.push(b'\t');
                    i += 1;
                }
                b'b' => {
                    out.push(b'\x08');
                    i += 1;
                }
                b'f' => {
                    out.push(b'\x0C');
                    i += 1;
                }
                b'(' | b')' | b'\\' => {
                    out.push(next);
                    i += 1;
                }
                b'0'..=b'7' => {
                    let mut value = 0u16;
                    let mut digits = 0;
                    while digits < 3 {
                        match inner.get(i) {
                            Some(&digit @ b'0'..=b'7') => {
                                value = value * 8 + u16::from(digit - b'0');
                                i += 1;
                                digits += 1;
                            }
                            _ => break,
                        }
                    }
                    out.push((value & 0xFF) as u8);
                }
                b'\r' => {
                    // Line continuation: swallow CR or CRLF.
                    i += 1;
                    if inner.get(i) == Some(&b'\n') {
                        i += 1;
                    }
                }
                b'\n' => {
                    i += 1;
                }
                _ => {
                    // Escape with no special meaning.
                    out.push(next);
                    i += 1;
                }
            }
        } else if byte == b'\r' {
            out.push(b'\n');
            i += 1;
            if inner.get(i) == Some(&b'\n') {
                i += 1;
            }
        } else {
            out.push(byte);
            i += 1;
        }
    }
    out
}

/// Decode the bytes between the angle brackets of a hex string token.
///
/// Pairs of hex digits become bytes; non-hex bytes are skipped; an odd
/// trailing digit is padded with an implicit `0` nibble.
pub fn decode_hex(inner: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(inner.len() / 2);
    let mut pending: Option<u8> = None;
    for &byte in inner {
        let Some(digit) = hex_value(byte) else {
            continue;
        };
        match pending.take() {
            Some(high) => out.push((high << 4) | digit),
            None => pending = Some(digit),
        }
    }
    if let Some(high) = pending {
        out.push(high << 4);
    }
    out
}

pub(crate) fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_plain_text() {
        assert_eq!(encode_literal(b"Hello World"), b"(Hello World)".to_vec());
        assert_eq!(encode_literal(b""), b"()".to_vec());
    }

    #[test]
    fn test_encode_escapes_specials() {
        assert_eq!(encode_literal(b"a(b)c"), b"(a\\(b\\)c)".to_vec());
        assert_eq!(encode_literal(b"back\\slash"), b"(back\\\\slash)".to_vec());
    }

    #[test]
    fn test_encode_control_characters() {
        assert_eq!(encode_literal(b"TAB\tTAB"), b"(TAB\\tTAB)".to_vec());
        assert_eq!(encode_literal(b"a\nb"), b"(a\\nb)".to_vec());
        assert_eq!(encode_literal(b"a\rb"), b"(a\\rb)".to_vec());
        assert_eq!(encode_literal(b"a\x08\x0Cb"), b"(a\\b\\fb)".to_vec());
        // Unnamed control bytes get three octal digits.
        assert_eq!(encode_literal(b"\x01"), b"(\\001)".to_vec());
        assert_eq!(encode_literal(b"\x1F"), b"(\\037)".to_vec());
    }

    #[test]
    fn test_decode_named_escapes() {
        assert_eq!(
            decode_literal(b"a\\n\\r\\t\\b\\f\\(\\)\\\\z"),
            b"a\n\r\t\x08\x0C()\\z".to_vec()
        );
    }

    #[test]
    fn test_decode_octal_escapes() {
        assert_eq!(decode_literal(b"\\101"), b"A".to_vec());
        assert_eq!(decode_literal(b"\\1015"), b"A5".to_vec());
        // One and two digit forms.
        assert_eq!(decode_literal(b"\\0"), b"\0".to_vec());
        assert_eq!(decode_literal(b"\\53"), b"+".to_vec());
        // Values past 255 truncate to the low 8 bits.
        assert_eq!(decode_literal(b"\\777"), vec![0xFF]);
        assert_eq!(decode_literal(b"\\400"), vec![0x00]);
    }

    #[test]
    fn test_decode_line_continuation() {
        assert_eq!(decode_literal(b"split\\\nword"), b"splitword".to_vec());
        assert_eq!(decode_literal(b"split\\\rword"), b"splitword".to_vec());
        assert_eq!(decode_literal(b"split\\\r\nword"), b"splitword".to_vec());
    }

    #[test]
    fn test_decode_raw_line_endings_normalize_to_lf() {
        assert_eq!(decode_literal(b"a\rb"), b"a\nb".to_vec());
        assert_eq!(decode_literal(b"a\r\nb"), b"a\nb".to_vec());
        assert_eq!(decode_literal(b"a\nb"), b"a\nb".to_vec());
    }

    #[test]
    fn test_decode_unknown_escape_is_literal() {
        assert_eq!(decode_literal(b"\\q\\8"), b"q8".to_vec());
    }

    #[test]
    fn test_decode_trailing_backslash() {
        assert_eq!(decode_literal(b"abc\\"), b"abc".to_vec());
    }

    #[test]
    fn test_round_trip_all_bytes() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        let encoded = encode_literal(&bytes);
        assert_eq!(decode_literal(&encoded[1..encoded.len() - 1]), bytes);
    }

    #[test]
    fn test_decode_hex_pairs() {
        assert_eq!(decode_hex(b"48656C6C6F"), b"Hello".to_vec());
        assert_eq!(decode_hex(b"48 65 6c 6C 6f"), b"Hello".to_vec());
        assert_eq!(decode_hex(b""), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_hex_odd_digit_pads() {
        assert_eq!(decode_hex(b"1"), vec![0x10]);
        assert_eq!(decode_hex(b"ABC"), vec![0xAB, 0xC0]);
    }

    #[test]
    fn test_decode_hex_skips_garbage() {
        assert_eq!(decode_hex(b"4x8y65"), vec![0x48, 0x65]);
    }
}
