use crate::model::tag::{TypeTag, tags_intersect};
use crate::model::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which face of the node a port sits on. Inputs receive, outputs emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortSide {
    Input,
    Output,
}

impl PortSide {
    pub fn opposite(self) -> PortSide {
        match self {
            PortSide::Input => PortSide::Output,
            PortSide::Output => PortSide::Input,
        }
    }
}

impl fmt::Display for PortSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSide::Input => write!(f, "input"),
            PortSide::Output => write!(f, "output"),
        }
    }
}

/// How many connections a port tolerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortCapacity {
    Single,
    Multi,
}

/// Fully-qualified address of a port: the owning node's id plus the port id.
///
/// Connections are stored as pairs of these instead of live references, so
/// every lookup goes back through the document and nothing dangles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortRef {
    pub node_id: String,
    pub port_id: String,
}

impl PortRef {
    pub fn new(node_id: impl Into<String>, port_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            port_id: port_id.into(),
        }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.node_id, self.port_id)
    }
}

/// Everything needed to create a port on a node.
///
/// Starts from the common case (multi-capacity, not removable, accepts its
/// own value tag) and is refined through the `with_*` methods.
#[derive(Debug, Clone)]
pub struct PortConfig {
    pub label: String,
    pub side: PortSide,
    pub value_tag: TypeTag,
    pub accepted: Option<Vec<TypeTag>>,
    pub capacity: PortCapacity,
    pub field: Option<FieldValue>,
    pub conditional: bool,
    pub conditional_source: Option<String>,
    pub allows_new_conditional: bool,
    pub removable: bool,
    pub anchor: Option<String>,
}

impl PortConfig {
    pub fn new(label: impl Into<String>, side: PortSide, value_tag: impl Into<TypeTag>) -> Self {
        Self {
            label: label.into(),
            side,
            value_tag: value_tag.into(),
            accepted: None,
            capacity: PortCapacity::Multi,
            field: None,
            conditional: false,
            conditional_source: None,
            allows_new_conditional: false,
            removable: false,
            anchor: None,
        }
    }

    pub fn input(label: impl Into<String>, value_tag: impl Into<TypeTag>) -> Self {
        Self::new(label, PortSide::Input, value_tag)
    }

    pub fn output(label: impl Into<String>, value_tag: impl Into<TypeTag>) -> Self {
        Self::new(label, PortSide::Output, value_tag)
    }

    /// Widens the accepted set beyond the value tag. An empty list is rejected
    /// at creation time.
    pub fn with_accepted(mut self, accepted: Vec<TypeTag>) -> Self {
        self.accepted = Some(accepted);
        self
    }

    pub fn with_capacity(mut self, capacity: PortCapacity) -> Self {
        self.capacity = capacity;
        self
    }

    /// Attaches an inline-editable field holding the given initial value.
    pub fn with_field(mut self, field: FieldValue) -> Self {
        self.field = Some(field);
        self
    }

    pub fn with_removable(mut self, removable: bool) -> Self {
        self.removable = removable;
        self
    }

    /// Marks the port as a gate: new conditional chains attach beneath it.
    pub fn with_conditional_gate(mut self, allows: bool) -> Self {
        self.allows_new_conditional = allows;
        self
    }

    /// Marks the port as a conditional chain link. `None` asks for the chain
    /// root, `Some(id)` chains beneath the port with that id.
    pub fn with_conditional(mut self, source: Option<String>) -> Self {
        self.conditional = true;
        self.conditional_source = source;
        self
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }
}

/// A single typed port on a node.
///
/// Ports are created and mutated exclusively through the owning document;
/// callers read them through shared references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortModel {
    pub id: String,
    pub label: String,
    pub side: PortSide,
    pub value_tag: TypeTag,
    pub accepted: Vec<TypeTag>,
    pub capacity: PortCapacity,
    pub field: Option<FieldValue>,
    pub conditional: bool,
    pub conditional_source: Option<String>,
    pub allows_new_conditional: bool,
    pub removable: bool,
    pub anchor: Option<String>,
    pub connections: Vec<PortRef>,
}

impl PortModel {
    pub(crate) fn from_config(id: String, config: PortConfig) -> Self {
        let accepted = config
            .accepted
            .unwrap_or_else(|| vec![config.value_tag.clone()]);
        Self {
            id,
            label: config.label,
            side: config.side,
            value_tag: config.value_tag,
            accepted,
            capacity: config.capacity,
            field: config.field,
            conditional: config.conditional,
            conditional_source: config.conditional_source,
            allows_new_conditional: config.allows_new_conditional,
            removable: config.removable,
            anchor: config.anchor,
            connections: Vec::new(),
        }
    }

    /// Whether this port carries an inline-editable field.
    pub fn is_field(&self) -> bool {
        self.field.is_some()
    }

    /// A `Single` port with a connection is saturated; `Multi` never is.
    pub fn has_capacity(&self) -> bool {
        self.capacity == PortCapacity::Multi || self.connections.is_empty()
    }

    /// The compatibility predicate behind `GraphDocument::connect`: opposite
    /// sides, intersecting accepted sets and free capacity on `other`. The
    /// document checks both directions so both capacities gate.
    pub fn can_connect_to(&self, other: &PortModel) -> bool {
        self.side == other.side.opposite()
            && tags_intersect(&self.accepted, &other.accepted)
            && other.has_capacity()
    }

    pub fn is_connected_to(&self, peer: &PortRef) -> bool {
        self.connections.contains(peer)
    }

    pub(crate) fn attach(&mut self, peer: PortRef) {
        self.connections.push(peer);
    }

    pub(crate) fn detach(&mut self, peer: &PortRef) {
        self.connections.retain(|existing| existing != peer);
    }

    /// Overwrites the field value. Returns false (and changes nothing) when
    /// the port carries no field.
    pub(crate) fn set_value(&mut self, raw: &str) -> bool {
        match &mut self.field {
            Some(field) => {
                field.set(raw);
                true
            }
            None => false,
        }
    }
}
