use crate::model::port::{PortModel, PortSide};
use serde::{Deserialize, Serialize};

/// A 2D canvas position in editor coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A single node in the graph: a kind tag, editable title and payload text,
/// a canvas position, optional group membership and two ordered port lists.
///
/// Port order inside `inputs` and `outputs` is display order and survives
/// persistence exactly. `minimal_ports` is the per-side floor enforced when
/// ports are removed, never retroactively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeModel {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub position: Position,
    pub group_id: Option<String>,
    pub text: String,
    pub minimal_ports: usize,
    pub inputs: Vec<PortModel>,
    pub outputs: Vec<PortModel>,
}

impl NodeModel {
    pub(crate) fn new(id: String, kind: String, name: String, position: Position) -> Self {
        Self {
            id,
            kind,
            name,
            position,
            group_id: None,
            text: String::new(),
            minimal_ports: 1,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn ports(&self, side: PortSide) -> &[PortModel] {
        match side {
            PortSide::Input => &self.inputs,
            PortSide::Output => &self.outputs,
        }
    }

    pub(crate) fn ports_mut(&mut self, side: PortSide) -> &mut Vec<PortModel> {
        match side {
            PortSide::Input => &mut self.inputs,
            PortSide::Output => &mut self.outputs,
        }
    }

    pub fn all_ports(&self) -> impl Iterator<Item = &PortModel> {
        self.inputs.iter().chain(self.outputs.iter())
    }

    pub fn port(&self, port_id: &str) -> Option<&PortModel> {
        self.all_ports().find(|port| port.id == port_id)
    }

    pub(crate) fn port_mut(&mut self, port_id: &str) -> Option<&mut PortModel> {
        self.inputs
            .iter_mut()
            .chain(self.outputs.iter_mut())
            .find(|port| port.id == port_id)
    }

    pub(crate) fn push_port(&mut self, port: PortModel) {
        self.ports_mut(port.side).push(port);
    }

    pub fn conditional_ports(&self) -> impl Iterator<Item = &PortModel> {
        self.all_ports().filter(|port| port.conditional)
    }

    /// The conditional port chained beneath `source`, if one exists. `None`
    /// looks up the chain root.
    pub fn conditional_for_source(&self, source: Option<&str>) -> Option<&PortModel> {
        self.conditional_ports()
            .find(|port| port.conditional_source.as_deref() == source)
    }

    /// The port new conditional chains attach beneath: the last output that
    /// allows them.
    pub fn gate_port(&self) -> Option<&PortModel> {
        self.outputs
            .iter()
            .rev()
            .find(|port| port.allows_new_conditional)
    }
}
