//! Content stream object/operator parser
//!
//! Assembles composite operands from primitive tokens and emits
//! `(operand-list, operator)` records. The content stream grammar is
//! strictly postfix: zero or more operands precede exactly one operator
//! keyword.
//!
//! Parsing is total. Malformed tokens, unbalanced composites and trailing
//! operands become [`Diagnostic`] entries next to a best-effort result;
//! nothing here ever returns a fatal error.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::lexer::{ContentLexer, Token};
use super::Diagnostic;

/// A fully assembled operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Number(f64),
    Name(String),
    String(Vec<u8>),
    Array(Vec<Operand>),
    Dictionary(HashMap<String, Operand>),
    Boolean(bool),
    Null,
    /// Indirect object reference (`obj gen R`).
    Reference(u32, u16),
}

impl Operand {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Operand::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Operand::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_string_bytes(&self) -> Option<&[u8]> {
        match self {
            Operand::String(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// One instruction: an operand run terminated by its operator.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentOp {
    pub operands: Vec<Operand>,
    pub operator: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Composite {
    Array,
    Dict,
}

impl Composite {
    fn noun(self) -> &'static str {
        match self {
            Composite::Array => "array",
            Composite::Dict => "dictionary",
        }
    }
}

struct Frame {
    start: usize,
    kind: Composite,
}

/// Parse a content stream into instruction records plus diagnostics.
///
/// Always returns a usable (possibly partial) result; see the module docs
/// for the recovery policy.
pub fn parse_content_stream(input: &[u8]) -> (Vec<ContentOp>, Vec<Diagnostic>) {
    let mut lexer = ContentLexer::new(input);
    let mut ops: Vec<ContentOp> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut stack: Vec<Operand> = Vec::new();
    let mut frames: Vec<Frame> = Vec::new();

    loop {
        match lexer.next_token() {
            Ok(Some(token)) => match token {
                Token::Number(value) => stack.push(Operand::Number(value)),
                Token::Name(name) => stack.push(Operand::Name(name)),
                Token::LiteralString(bytes) | Token::HexString(bytes) => {
                    stack.push(Operand::String(bytes))
                }
                Token::Boolean(value) => stack.push(Operand::Boolean(value)),
                Token::Null => stack.push(Operand::Null),
                Token::ArrayOpen => frames.push(Frame {
                    start: stack.len(),
                    kind: Composite::Array,
                }),
                Token::DictOpen => frames.push(Frame {
                    start: stack.len(),
                    kind: Composite::Dict,
                }),
                Token::ArrayClose => close_composite(
                    Composite::Array,
                    &mut stack,
                    &mut frames,
                    &mut diagnostics,
                    lexer.position(),
                ),
                Token::DictClose => close_composite(
                    Composite::Dict,
                    &mut stack,
                    &mut frames,
                    &mut diagnostics,
                    lexer.position(),
                ),
                Token::Operator(operator) => {
                    if operator == "R" && fold_reference(&mut stack, &frames) {
                        continue;
                    }
                    if !frames.is_empty() {
                        diagnostics.push(Diagnostic::new(
                            lexer.position(),
                            format!("operator '{operator}' inside an unclosed composite"),
                        ));
                        truncate_frames(&mut stack, &mut frames, &mut diagnostics, lexer.position());
                    }
                    ops.push(ContentOp {
                        operands: std::mem::take(&mut stack),
                        operator,
                    });
                }
            },
            Ok(None) => break,
            Err(err) => {
                diagnostics.push(Diagnostic::from(err));
                lexer.resync();
            }
        }
    }

    if !frames.is_empty() {
        diagnostics.push(Diagnostic::new(
            lexer.position(),
            "unterminated composite at end of stream",
        ));
        truncate_frames(&mut stack, &mut frames, &mut diagnostics, lexer.position());
    }
    if !stack.is_empty() {
        // Real-world streams occasionally end mid-instruction.
        diagnostics.push(Diagnostic::new(
            lexer.position(),
            format!(
                "{} trailing operand(s) without an operator at end of stream",
                stack.len()
            ),
        ));
    }

    for diagnostic in &diagnostics {
        warn!(position = diagnostic.position, message = %diagnostic.message, "content stream diagnostic");
    }
    debug!(
        ops = ops.len(),
        diagnostics = diagnostics.len(),
        "parsed content stream"
    );

    (ops, diagnostics)
}

/// Fold `obj gen R` on top of the stack into a reference operand. Returns
/// false when the preceding operands are not two non-negative integers
/// within the current composite, in which case `R` is treated as an
/// ordinary operator by the caller.
fn fold_reference(stack: &mut Vec<Operand>, frames: &[Frame]) -> bool {
    let floor = frames.last().map_or(0, |frame| frame.start);
    if stack.len() < floor + 2 {
        return false;
    }
    let obj = integer_operand(&stack[stack.len() - 2], u32::MAX as f64);
    let gen = integer_operand(&stack[stack.len() - 1], u16::MAX as f64);
    match (obj, gen) {
        (Some(obj), Some(gen)) => {
            stack.truncate(stack.len() - 2);
            stack.push(Operand::Reference(obj as u32, gen as u16));
            true
        }
        _ => false,
    }
}

fn integer_operand(operand: &Operand, max: f64) -> Option<f64> {
    match operand {
        Operand::Number(value) if value.fract() == 0.0 && *value >= 0.0 && *value <= max => {
            Some(*value)
        }
        _ => None,
    }
}

fn close_composite(
    kind: Composite,
    stack: &mut Vec<Operand>,
    frames: &mut Vec<Frame>,
    diagnostics: &mut Vec<Diagnostic>,
    position: usize,
) {
    match frames.pop() {
        Some(frame) => {
            if frame.kind != kind {
                diagnostics.push(Diagnostic::new(
                    position,
                    format!(
                        "mismatched {} close inside {}, recovered by truncation",
                        kind.noun(),
                        frame.kind.noun()
                    ),
                ));
            }
            let items = stack.split_off(frame.start);
            stack.push(build_composite(frame.kind, items, diagnostics, position));
        }
        None => diagnostics.push(Diagnostic::new(
            position,
            format!("unmatched {} close ignored", kind.noun()),
        )),
    }
}

/// Fold every open frame, innermost first. Used when an operator or the end
/// of the stream arrives with composites still open.
fn truncate_frames(
    stack: &mut Vec<Operand>,
    frames: &mut Vec<Frame>,
    diagnostics: &mut Vec<Diagnostic>,
    position: usize,
) {
    while let Some(frame) = frames.pop() {
        let items = stack.split_off(frame.start);
        stack.push(build_composite(frame.kind, items, diagnostics, position));
    }
}

fn build_composite(
    kind: Composite,
    items: Vec<Operand>,
    diagnostics: &mut Vec<Diagnostic>,
    position: usize,
) -> Operand {
    match kind {
        Composite::Array => Operand::Array(items),
        Composite::Dict => {
            let mut map = HashMap::new();
            let mut iter = items.into_iter();
            while let Some(key) = iter.next() {
                let Operand::Name(key) = key else {
                    diagnostics.push(Diagnostic::new(
                        position,
                        "dictionary key is not a name, entry skipped",
                    ));
                    continue;
                };
                match iter.next() {
                    Some(value) => {
                        map.insert(key, value);
                    }
                    None => {
                        diagnostics.push(Diagnostic::new(
                            position,
                            format!("dictionary key /{key} has no value, entry dropped"),
                        ));
                    }
                }
            }
            Operand::Dictionary(map)
        }
    }
}
