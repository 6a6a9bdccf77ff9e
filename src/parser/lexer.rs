//! Content stream token lexer
//!
//! Produces primitive tokens from a byte buffer. String tokens are decoded
//! through [`crate::text::literal`] so the lexer and the text-value codec can
//! never diverge on the string grammar.
//!
//! Every error here is recoverable: callers record a diagnostic, call
//! [`ContentLexer::resync`], and keep lexing.

use super::scanner::{self, ByteScanner};
use super::LexError;
use crate::text::literal;

/// Primitive content stream tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Name(String),
    LiteralString(Vec<u8>),
    HexString(Vec<u8>),
    ArrayOpen,
    ArrayClose,
    DictOpen,
    DictClose,
    Boolean(bool),
    Null,
    /// Any other run of regular bytes. Whether the identifier is a known
    /// operator is decided by the parser; unrecognized ones are preserved.
    Operator(String),
}

pub type LexResult<T> = std::result::Result<T, LexError>;

/// Tokenizer over a borrowed content stream buffer.
pub struct ContentLexer<'a> {
    scanner: ByteScanner<'a>,
}

impl<'a> ContentLexer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            scanner: ByteScanner::new(input),
        }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Skip to the next whitespace/delimiter boundary after a malformed
    /// token so lexing can continue.
    pub fn resync(&mut self) {
        self.scanner.skip_to_boundary();
    }

    /// The next token, or `None` at end of stream.
    pub fn next_token(&mut self) -> LexResult<Option<Token>> {
        self.scanner.skip_whitespace();

        let Some(byte) = self.scanner.peek() else {
            return Ok(None);
        };

        match byte {
            b'+' | b'-' | b'.' | b'0'..=b'9' => self.read_number().map(Some),
            b'(' => self.read_literal_string().map(Some),
            b'<' => {
                if self.scanner.peek_at(1) == Some(b'<') {
                    self.scanner.advance_by(2);
                    Ok(Some(Token::DictOpen))
                } else {
                    self.read_hex_string().map(Some)
                }
            }
            b'>' => {
                if self.scanner.peek_at(1) == Some(b'>') {
                    self.scanner.advance_by(2);
                    Ok(Some(Token::DictClose))
                } else {
                    let position = self.scanner.position();
                    self.scanner.advance();
                    Err(LexError::UnexpectedDelimiter {
                        position,
                        byte: '>',
                    })
                }
            }
            b'[' => {
                self.scanner.advance();
                Ok(Some(Token::ArrayOpen))
            }
            b']' => {
                self.scanner.advance();
                Ok(Some(Token::ArrayClose))
            }
            b'/' => self.read_name().map(Some),
            // Braces delimit PostScript calculator functions; keep them as
            // operator tokens rather than failing.
            b'{' | b'}' => {
                self.scanner.advance();
                Ok(Some(Token::Operator((byte as char).to_string())))
            }
            b')' => {
                let position = self.scanner.position();
                self.scanner.advance();
                Err(LexError::UnexpectedDelimiter {
                    position,
                    byte: ')',
                })
            }
            _ => self.read_keyword().map(Some),
        }
    }

    fn read_number(&mut self) -> LexResult<Token> {
        let start = self.scanner.position();
        let mut digits = 0;
        let mut dots = 0;

        if matches!(self.scanner.peek(), Some(b'+' | b'-')) {
            self.scanner.advance();
        }
        while let Some(byte) = self.scanner.peek() {
            match byte {
                b'0'..=b'9' => {
                    digits += 1;
                    self.scanner.advance();
                }
                b'.' => {
                    dots += 1;
                    self.scanner.advance();
                }
                _ => break,
            }
        }

        // A lone sign or point, or more than one point, is malformed.
        // `.5` and `5.` are tolerated as 0.5 and 5.0.
        if digits == 0 || dots > 1 {
            return Err(LexError::MalformedNumber { position: start });
        }

        let text = self.scanner.slice(start, self.scanner.position());
        std::str::from_utf8(text)
            .ok()
            .and_then(|text| text.parse::<f64>().ok())
            .map(Token::Number)
            .ok_or(LexError::MalformedNumber { position: start })
    }

    fn read_name(&mut self) -> LexResult<Token> {
        self.scanner.advance(); // consume '/'
        let mut bytes = Vec::new();

        while let Some(byte) = self.scanner.peek() {
            if !scanner::is_regular(byte) {
                break;
            }
            self.scanner.advance();

            if byte == b'#' {
                // #xx decodes when both digits are hex; otherwise the '#'
                // passes through literally.
                let high = self.scanner.peek().and_then(literal::hex_value);
                let low = self.scanner.peek_at(1).and_then(literal::hex_value);
                match (high, low) {
                    (Some(high), Some(low)) => {
                        self.scanner.advance_by(2);
                        bytes.push((high << 4) | low);
                    }
                    _ => bytes.push(b'#'),
                }
            } else {
                bytes.push(byte);
            }
        }

        Ok(Token::Name(String::from_utf8_lossy(&bytes).into_owned()))
    }

    fn read_literal_string(&mut self) -> LexResult<Token> {
        let open = self.scanner.position();
        self.scanner.advance(); // consume '('
        let start = self.scanner.position();
        let mut depth = 1usize;

        loop {
            let Some(byte) = self.scanner.advance() else {
                return Err(LexError::UnterminatedString { position: open });
            };
            match byte {
                // An escaped byte never affects nesting.
                b'\\' => {
                    self.scanner.advance();
                }
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }

        let inner = self.scanner.slice(start, self.scanner.position() - 1);
        Ok(Token::LiteralString(literal::decode_literal(inner)))
    }

    fn read_hex_string(&mut self) -> LexResult<Token> {
        let open = self.scanner.position();
        self.scanner.advance(); // consume '<'
        let start = self.scanner.position();

        loop {
            match self.scanner.advance() {
                Some(b'>') => break,
                Some(_) => {}
                None => return Err(LexError::UnterminatedString { position: open }),
            }
        }

        let inner = self.scanner.slice(start, self.scanner.position() - 1);
        Ok(Token::HexString(literal::decode_hex(inner)))
    }

    fn read_keyword(&mut self) -> LexResult<Token> {
        let word = self.scanner.read_regular_run();
        match word {
            b"true" => Ok(Token::Boolean(true)),
            b"false" => Ok(Token::Boolean(false)),
            b"null" => Ok(Token::Null),
            _ => Ok(Token::Operator(String::from_utf8_lossy(word).into_owned())),
        }
    }
}
