use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known tags understood by the inline field editors.
///
/// Tags are otherwise free-form: a host invents whatever vocabulary its node
/// kinds need ("dialogue", "actor", ...) and the core never interprets it.
pub mod tags {
    pub const BOOL: &str = "bool";
    pub const NUMBER: &str = "number";
    pub const STRING: &str = "string";
}

/// An opaque identifier for the semantic data type a port emits or accepts.
///
/// Tags compare verbatim. There is no coercion and no subtype widening; a port
/// that should accept several types lists several tags in its accepted set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(String);

impl TypeTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The segment after the last `.` or `:`, used for default port labels
    /// and default node names ("quest.Dialogue" -> "Dialogue").
    pub fn short_name(&self) -> &str {
        self.0
            .rsplit(['.', ':'])
            .next()
            .unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TypeTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for TypeTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// Returns true when the two accepted-tag sets share at least one tag.
///
/// This predicate is the sole gate for type compatibility between ports;
/// everything else about connecting is side and capacity.
pub fn tags_intersect(a: &[TypeTag], b: &[TypeTag]) -> bool {
    a.iter().any(|tag| b.contains(tag))
}
