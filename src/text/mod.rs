//! Text value encoding
//!
//! The literal-string codec and the control-character policy that together
//! turn an application string into content stream string tokens and back.

pub mod literal;
pub mod normalize;

pub use self::literal::{decode_hex, decode_literal, encode_literal};
pub use self::normalize::{encode_text_value, TextSegment, TextValue};
