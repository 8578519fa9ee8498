use crate::model::tag::{TypeTag, tags};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of inline-editable field kinds, each carrying its value as
/// the raw string the editor produced.
///
/// The presentation layer maps every kind onto a widget (toggle, number box,
/// text area); the core only stores the encoding and can check whether the
/// raw string is valid for its kind. Supporting a new kind means adding a
/// variant here, not registering behavior at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldValue {
    Bool(String),
    Number(String),
    Text(String),
}

impl FieldValue {
    /// Picks the field kind for a port's value tag. Unknown tags fall back to
    /// `Text`, which accepts anything.
    pub fn for_tag(tag: &TypeTag, raw: impl Into<String>) -> Self {
        match tag.as_str() {
            tags::BOOL => FieldValue::Bool(raw.into()),
            tags::NUMBER => FieldValue::Number(raw.into()),
            _ => FieldValue::Text(raw.into()),
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            FieldValue::Bool(raw) | FieldValue::Number(raw) | FieldValue::Text(raw) => raw,
        }
    }

    /// Replaces the stored value, keeping the kind.
    pub fn set(&mut self, raw: impl Into<String>) {
        match self {
            FieldValue::Bool(slot) | FieldValue::Number(slot) | FieldValue::Text(slot) => {
                *slot = raw.into();
            }
        }
    }

    /// Whether the raw string parses under this kind's validator.
    ///
    /// `Bool` accepts `true`/`false` case-insensitively, `Number` anything
    /// that parses as `f64`, `Text` everything.
    pub fn is_valid(&self) -> bool {
        match self {
            FieldValue::Bool(raw) => {
                let lower = raw.to_lowercase();
                lower == "true" || lower == "false"
            }
            FieldValue::Number(raw) => raw.parse::<f64>().is_ok(),
            FieldValue::Text(_) => true,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "bool",
            FieldValue::Number(_) => "number",
            FieldValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}
