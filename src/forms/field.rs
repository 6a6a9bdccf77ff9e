//! Form field and registry definitions
//!
//! The minimal collaborator surface around the codec: a name-keyed field
//! registry, per-field flags, and the `set_value` entry point that rewrites
//! a field's normal appearance stream.

use std::collections::HashMap;

use bitflags::bitflags;
use tracing::{debug, warn};

use super::appearance::{build_appearance_stream, AppearanceOptions};
use crate::error::{Error, Result};
use crate::text::normalize::TextValue;

bitflags! {
    /// Field flags, the `Ff` bit set of ISO 32000-1 Tables 221 and 228.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FieldFlags: u32 {
        const READ_ONLY = 1 << 0;
        const REQUIRED = 1 << 1;
        const NO_EXPORT = 1 << 2;
        const MULTILINE = 1 << 12;
        const PASSWORD = 1 << 13;
        const DO_NOT_SPELL_CHECK = 1 << 22;
        const DO_NOT_SCROLL = 1 << 23;
    }
}

/// A text form field with one widget annotation.
#[derive(Debug, Clone)]
pub struct FormField {
    name: String,
    flags: FieldFlags,
    /// Default appearance string (`DA`), echoed into generated appearance
    /// streams.
    default_appearance: String,
    appearance: AppearanceOptions,
    value: Option<TextValue>,
    normal_appearance: Vec<u8>,
}

impl FormField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: FieldFlags::empty(),
            default_appearance: "/Helv 12 Tf 0 g".to_string(),
            appearance: AppearanceOptions::default(),
            value: None,
            normal_appearance: Vec::new(),
        }
    }

    pub fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_default_appearance(mut self, default_appearance: impl Into<String>) -> Self {
        self.default_appearance = default_appearance.into();
        self
    }

    pub fn with_appearance_options(mut self, options: AppearanceOptions) -> Self {
        self.appearance = options;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> FieldFlags {
        self.flags
    }

    pub fn default_appearance(&self) -> &str {
        &self.default_appearance
    }

    /// The current value, if one has been set.
    pub fn value(&self) -> Option<&str> {
        self.value.as_ref().map(TextValue::as_str)
    }

    /// Raw bytes of the widget's normal appearance stream.
    pub fn normal_appearance_bytes(&self) -> &[u8] {
        &self.normal_appearance
    }

    /// Set the field value, rewriting the widget's normal appearance
    /// stream. On error the existing stream is left untouched.
    pub fn set_value(&mut self, value: &str) -> Result<()> {
        if self.flags.contains(FieldFlags::READ_ONLY) {
            return Err(Error::ReadOnlyField(self.name.clone()));
        }
        let value = match TextValue::new(value) {
            Ok(value) => value,
            Err(err) => {
                warn!(field = %self.name, error = %err, "rejected field value");
                return Err(err);
            }
        };

        self.normal_appearance =
            build_appearance_stream(&value, &self.default_appearance, &self.appearance);
        debug!(
            field = %self.name,
            segments = value.segments().len(),
            stream_len = self.normal_appearance.len(),
            "rewrote field appearance"
        );
        self.value = Some(value);
        Ok(())
    }
}

/// Name-keyed field registry, the lookup surface of a document's form.
#[derive(Debug, Default)]
pub struct FormFields {
    fields: HashMap<String, FormField>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field, replacing any previous field of the same name.
    pub fn add_field(&mut self, field: FormField) {
        self.fields.insert(field.name().to_string(), field);
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.get(name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.get_mut(name)
    }

    /// Look up a field by name and set its value.
    pub fn set_field_value(&mut self, name: &str, value: &str) -> Result<()> {
        let field = self
            .field_mut(name)
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))?;
        field.set_value(value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
