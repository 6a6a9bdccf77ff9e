//! Byte scanner for content streams
//!
//! A cursor over a raw byte buffer with the lexical byte classes from
//! ISO 32000-1 Section 7.2. End-of-buffer is a normal terminal condition for
//! every operation here; only higher layers decide whether it is an error.

/// PDF whitespace: NUL, TAB, LF, FF, CR, SPACE.
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b'\0' | b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
}

/// PDF delimiters: `( ) < > [ ] { } / %`.
pub fn is_delimiter(byte: u8) -> bool {
    matches!(
        byte,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

/// Any byte that is neither whitespace nor a delimiter.
pub fn is_regular(byte: u8) -> bool {
    !is_whitespace(byte) && !is_delimiter(byte)
}

/// Cursor over a borrowed content stream buffer.
pub struct ByteScanner<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> ByteScanner<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, position: 0 }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Peek at the current byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    /// Peek `offset` bytes past the cursor.
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.position + offset).copied()
    }

    /// Consume and return the current byte.
    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.position += 1;
        Some(byte)
    }

    pub fn advance_by(&mut self, n: usize) {
        self.position = (self.position + n).min(self.input.len());
    }

    /// Borrow the bytes between two offsets already visited.
    pub fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.input[start..end]
    }

    /// Skip whitespace and comments. A comment runs from `%` to end of line
    /// and counts as whitespace.
    pub fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            if is_whitespace(byte) {
                self.position += 1;
            } else if byte == b'%' {
                self.skip_comment();
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self) {
        while let Some(byte) = self.peek() {
            if byte == b'\n' || byte == b'\r' {
                break;
            }
            self.position += 1;
        }
    }

    /// Skip ahead to the next whitespace or delimiter boundary. Used to
    /// resynchronize after a malformed token.
    pub fn skip_to_boundary(&mut self) {
        while let Some(byte) = self.peek() {
            if is_whitespace(byte) || is_delimiter(byte) {
                break;
            }
            self.position += 1;
        }
    }

    /// Consume a run of regular bytes starting at the cursor.
    pub fn read_regular_run(&mut self) -> &'a [u8] {
        let start = self.position;
        while let Some(byte) = self.peek() {
            if !is_regular(byte) {
                break;
            }
            self.position += 1;
        }
        &self.input[start..self.position]
    }
}
