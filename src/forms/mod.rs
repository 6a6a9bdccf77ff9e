//! Interactive form field surface
//!
//! A minimal text-field model: name-keyed lookup, field flags, and value
//! assignment that rewrites the widget's normal appearance stream through
//! the control-character policy and the string literal codec.

mod appearance;
mod field;

pub use appearance::{build_appearance_stream, AppearanceOptions};
pub use field::{FieldFlags, FormField, FormFields};
