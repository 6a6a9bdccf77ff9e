//! Content Stream Parser Module
//!
//! Tokenizes and parses PDF content streams according to the lexical rules of
//! ISO 32000-1 Section 7.2 and the operand-then-operator grammar of
//! Section 7.8.2.
//!
//! Parsing is best-effort by design: content streams are frequently produced
//! by imperfect tools, so malformed tokens are recorded as [`Diagnostic`]
//! values and parsing continues instead of aborting.

pub mod content;
pub mod lexer;
pub mod scanner;

pub use self::content::{parse_content_stream, ContentOp, Operand};
pub use self::lexer::{ContentLexer, Token};
pub use self::scanner::ByteScanner;

use thiserror::Error;

/// Recoverable lexical errors.
///
/// None of these abort a parse: the parser records the error as a
/// [`Diagnostic`] and the lexer resynchronizes at the next
/// whitespace/delimiter boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Malformed number at position {position}")]
    MalformedNumber { position: usize },

    #[error("Unterminated string at position {position}")]
    UnterminatedString { position: usize },

    #[error("Unexpected delimiter '{byte}' at position {position}")]
    UnexpectedDelimiter { position: usize, byte: char },
}

impl LexError {
    /// Byte offset the error was detected at.
    pub fn position(&self) -> usize {
        match self {
            LexError::MalformedNumber { position }
            | LexError::UnterminatedString { position }
            | LexError::UnexpectedDelimiter { position, .. } => *position,
        }
    }
}

/// A non-fatal record of a malformed-input condition encountered during
/// parsing. Callers may inspect or ignore these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Byte offset into the content stream.
    pub position: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl From<LexError> for Diagnostic {
    fn from(err: LexError) -> Self {
        Diagnostic::new(err.position(), err.to_string())
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.position)
    }
}
