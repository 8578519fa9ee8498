use crate::error::GraphError;
use crate::model::{GroupModel, NodeModel, PortConfig, PortModel, PortRef, Position, TypeTag};
use ahash::AHashMap;
use itertools::Itertools;
use uuid::Uuid;

mod chain;
mod connection;

pub use chain::CONDITIONAL_PORT_LABEL;
pub use connection::Connection;

/// The aggregate root of one authored graph: sole owner of its nodes, groups
/// and realized connection set.
///
/// Entities are created through the document's factories, keep their id for
/// life and are removed only through the delete operations, which cascade
/// connection and chain cleanup. Every operation validates fully before
/// touching state, so a failed call leaves the document unchanged. Mutation
/// is synchronous and single-threaded; a host that edits from several
/// threads serializes intents in front of the document.
#[derive(Debug, Clone, Default)]
pub struct GraphDocument {
    nodes: AHashMap<String, NodeModel>,
    groups: AHashMap<String, GroupModel>,
    connections: Vec<Connection>,
    port_owners: AHashMap<String, String>,
}

impl GraphDocument {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- factories ----

    /// Creates a node of the given kind at `position`, with a generated id
    /// and a default name derived from the kind.
    pub fn create_node(&mut self, kind: &str, position: Position) -> &NodeModel {
        let id = mint_id();
        let name = default_name(kind, &id);
        let node = NodeModel::new(id.clone(), kind.to_string(), name, position);
        tracing::debug!(node = %id, kind, "node created");
        self.nodes.entry(id).or_insert(node)
    }

    /// Creates a port on `node_id` from `config`, appended to the end of its
    /// side's ordered list. Conditional configs go through the chain rules.
    pub fn create_port(
        &mut self,
        node_id: &str,
        config: PortConfig,
    ) -> Result<&PortModel, GraphError> {
        if !self.nodes.contains_key(node_id) {
            return Err(unknown_node(node_id));
        }
        if config.value_tag.is_empty() {
            return Err(GraphError::InvalidPortConfig {
                node_id: node_id.to_string(),
                reason: "value tag must not be empty".to_string(),
            });
        }
        if config.accepted.as_ref().is_some_and(|tags| tags.is_empty()) {
            return Err(GraphError::InvalidPortConfig {
                node_id: node_id.to_string(),
                reason: "accepted tag set must not be empty".to_string(),
            });
        }
        if config.conditional {
            return self.attach_conditional(node_id, config);
        }
        let port = PortModel::from_config(mint_id(), config);
        self.insert_port(node_id, port)
    }

    /// Creates a group at `position`. Nodes join through [`Self::set_group`].
    pub fn create_group(&mut self, kind: &str, position: Position) -> &GroupModel {
        let id = mint_id();
        let name = default_name(kind, &id);
        let group = GroupModel::new(id.clone(), kind.to_string(), name, position);
        self.groups.entry(id).or_insert(group)
    }

    pub(crate) fn insert_port(
        &mut self,
        node_id: &str,
        port: PortModel,
    ) -> Result<&PortModel, GraphError> {
        let port_id = port.id.clone();
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| unknown_node(node_id))?;
        node.push_port(port);
        self.port_owners.insert(port_id.clone(), node_id.to_string());
        self.find_port(&port_id)
    }

    // ---- deletion ----

    /// Deletes a removable port after disconnecting it and splicing any
    /// conditional chain that referenced it.
    ///
    /// Returns `Ok(false)` without touching anything when the port is not
    /// removable, and refuses with [`GraphError::BelowMinimalPorts`] when the
    /// port's side already sits at the node's floor.
    pub fn delete_port(&mut self, port_id: &str) -> Result<bool, GraphError> {
        let port_ref = self.port_ref(port_id)?;
        let node = self.find_node(&port_ref.node_id)?;
        let port = node.port(port_id).ok_or_else(|| unknown_port(port_id))?;
        if !port.removable {
            return Ok(false);
        }
        let side = port.side;
        if node.ports(side).len() <= node.minimal_ports {
            return Err(GraphError::BelowMinimalPorts {
                node_id: node.id.clone(),
                side,
                minimal: node.minimal_ports,
            });
        }

        let peers = port.connections.clone();
        for peer in &peers {
            self.disconnect(&port_ref, peer)?;
        }
        self.splice_chain(&port_ref.node_id, port_id)?;
        let node = self
            .nodes
            .get_mut(&port_ref.node_id)
            .ok_or_else(|| unknown_node(&port_ref.node_id))?;
        node.ports_mut(side).retain(|existing| existing.id != port_id);
        self.port_owners.remove(port_id);
        tracing::debug!(port = %port_id, node = %port_ref.node_id, "port deleted");
        Ok(true)
    }

    /// Deletes a node after disconnecting all of its ports. The cascade never
    /// reaches another node.
    pub fn delete_node(&mut self, node_id: &str) -> Result<(), GraphError> {
        if !self.nodes.contains_key(node_id) {
            return Err(unknown_node(node_id));
        }
        self.disconnect_node_ports(node_id, None)?;
        if let Some(node) = self.nodes.remove(node_id) {
            for port in node.all_ports() {
                self.port_owners.remove(&port.id);
            }
        }
        tracing::debug!(node = %node_id, "node deleted");
        Ok(())
    }

    /// Deletes a group. Member nodes are orphaned, never deleted.
    pub fn delete_group(&mut self, group_id: &str) -> Result<(), GraphError> {
        if self.groups.remove(group_id).is_none() {
            return Err(unknown_group(group_id));
        }
        for node in self.nodes.values_mut() {
            if node.group_id.as_deref() == Some(group_id) {
                node.group_id = None;
            }
        }
        Ok(())
    }

    // ---- node and group mutators ----

    /// Renames a node. Titles go through the same sanitizer as the editor's
    /// title field: whitespace and special characters are stripped.
    pub fn rename_node(&mut self, node_id: &str, name: &str) -> Result<(), GraphError> {
        let node = self.find_node_mut(node_id)?;
        node.name = sanitize_name(name);
        Ok(())
    }

    /// Places a node at an absolute canvas position.
    pub fn move_node(&mut self, node_id: &str, position: Position) -> Result<(), GraphError> {
        let node = self.find_node_mut(node_id)?;
        node.position = position;
        Ok(())
    }

    /// Replaces the node's free-form payload text.
    pub fn set_node_text(&mut self, node_id: &str, text: &str) -> Result<(), GraphError> {
        let node = self.find_node_mut(node_id)?;
        node.text = text.to_string();
        Ok(())
    }

    /// Sets the per-side port floor enforced by [`Self::delete_port`]. The
    /// floor never removes existing ports retroactively.
    pub fn set_minimal_ports(&mut self, node_id: &str, minimal: usize) -> Result<(), GraphError> {
        let node = self.find_node_mut(node_id)?;
        node.minimal_ports = minimal;
        Ok(())
    }

    pub fn set_group(&mut self, node_id: &str, group_id: &str) -> Result<(), GraphError> {
        if !self.groups.contains_key(group_id) {
            return Err(unknown_group(group_id));
        }
        let node = self.find_node_mut(node_id)?;
        node.group_id = Some(group_id.to_string());
        Ok(())
    }

    pub fn clear_group(&mut self, node_id: &str) -> Result<(), GraphError> {
        let node = self.find_node_mut(node_id)?;
        node.group_id = None;
        Ok(())
    }

    pub fn rename_group(&mut self, group_id: &str, name: &str) -> Result<(), GraphError> {
        let group = self.find_group_mut(group_id)?;
        group.name = sanitize_name(name);
        Ok(())
    }

    pub fn move_group(&mut self, group_id: &str, position: Position) -> Result<(), GraphError> {
        let group = self.find_group_mut(group_id)?;
        group.position = position;
        Ok(())
    }

    // ---- port mutators ----

    /// Overwrites the value of a field port. Calling this on a port without a
    /// field is a no-op; debug builds log it as a caller error.
    pub fn set_port_value(&mut self, port_id: &str, raw: &str) -> Result<(), GraphError> {
        let port = self.find_port_mut(port_id)?;
        if !port.set_value(raw) {
            #[cfg(debug_assertions)]
            tracing::warn!(port = %port_id, "set_port_value on a port without a field; ignored");
        }
        Ok(())
    }

    pub fn set_port_anchor(
        &mut self,
        port_id: &str,
        anchor: Option<String>,
    ) -> Result<(), GraphError> {
        let port = self.find_port_mut(port_id)?;
        port.anchor = anchor;
        Ok(())
    }

    /// Changes a port's value tag in place, collapsing its accepted set to
    /// the new tag and relabeling it (default: the tag's short name).
    ///
    /// Existing connections are kept as-is; only new connections validate
    /// against the new tag.
    pub fn retype_port(
        &mut self,
        port_id: &str,
        value_tag: impl Into<TypeTag>,
        label: Option<&str>,
    ) -> Result<(), GraphError> {
        let value_tag = value_tag.into();
        if value_tag.is_empty() {
            let owner = self.port_ref(port_id)?;
            return Err(GraphError::InvalidPortConfig {
                node_id: owner.node_id,
                reason: "value tag must not be empty".to_string(),
            });
        }
        let port = self.find_port_mut(port_id)?;
        port.label = label
            .map(str::to_string)
            .unwrap_or_else(|| value_tag.short_name().to_string());
        port.accepted = vec![value_tag.clone()];
        port.value_tag = value_tag;
        Ok(())
    }

    // ---- queries ----

    pub fn find_node(&self, node_id: &str) -> Result<&NodeModel, GraphError> {
        self.nodes.get(node_id).ok_or_else(|| unknown_node(node_id))
    }

    pub fn find_group(&self, group_id: &str) -> Result<&GroupModel, GraphError> {
        self.groups
            .get(group_id)
            .ok_or_else(|| unknown_group(group_id))
    }

    pub fn find_port(&self, port_id: &str) -> Result<&PortModel, GraphError> {
        let owner = self
            .port_owners
            .get(port_id)
            .ok_or_else(|| unknown_port(port_id))?;
        self.nodes
            .get(owner)
            .and_then(|node| node.port(port_id))
            .ok_or_else(|| unknown_port(port_id))
    }

    /// Resolves a port id to its full address.
    pub fn port_ref(&self, port_id: &str) -> Result<PortRef, GraphError> {
        let owner = self
            .port_owners
            .get(port_id)
            .ok_or_else(|| unknown_port(port_id))?;
        Ok(PortRef::new(owner.clone(), port_id))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeModel> {
        self.nodes.values()
    }

    pub fn groups(&self) -> impl Iterator<Item = &GroupModel> {
        self.groups.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// The realized connection set, in creation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Nodes outside any group, sorted by name then id for stable listings.
    pub fn ungrouped_nodes(&self) -> Vec<&NodeModel> {
        self.nodes
            .values()
            .filter(|node| node.group_id.is_none())
            .sorted_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)))
            .collect()
    }

    /// Member nodes of a group, sorted by name then id.
    pub fn group_members(&self, group_id: &str) -> Result<Vec<&NodeModel>, GraphError> {
        if !self.groups.contains_key(group_id) {
            return Err(unknown_group(group_id));
        }
        Ok(self
            .nodes
            .values()
            .filter(|node| node.group_id.as_deref() == Some(group_id))
            .sorted_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)))
            .collect())
    }

    // ---- internal resolution ----

    pub(crate) fn find_node_mut(&mut self, node_id: &str) -> Result<&mut NodeModel, GraphError> {
        self.nodes
            .get_mut(node_id)
            .ok_or_else(|| unknown_node(node_id))
    }

    fn find_group_mut(&mut self, group_id: &str) -> Result<&mut GroupModel, GraphError> {
        self.groups
            .get_mut(group_id)
            .ok_or_else(|| unknown_group(group_id))
    }

    pub(crate) fn find_port_mut(&mut self, port_id: &str) -> Result<&mut PortModel, GraphError> {
        let owner = self
            .port_owners
            .get(port_id)
            .cloned()
            .ok_or_else(|| unknown_port(port_id))?;
        self.nodes
            .get_mut(&owner)
            .and_then(|node| node.port_mut(port_id))
            .ok_or_else(|| unknown_port(port_id))
    }

    /// Resolves a full ref, catching refs whose node/port pairing is stale.
    pub(crate) fn resolve_ref(&self, port: &PortRef) -> Result<&PortModel, GraphError> {
        let owner = self
            .port_owners
            .get(&port.port_id)
            .ok_or_else(|| unknown_port(&port.port_id))?;
        if *owner != port.node_id {
            return Err(unknown_port(&port.port_id));
        }
        self.find_port(&port.port_id)
    }

    // ---- restore hooks for the asset codec ----

    pub(crate) fn restore_node(&mut self, node: NodeModel) {
        for port in node.all_ports() {
            self.port_owners.insert(port.id.clone(), node.id.clone());
        }
        self.nodes.insert(node.id.clone(), node);
    }

    pub(crate) fn restore_group(&mut self, group: GroupModel) {
        self.groups.insert(group.id.clone(), group);
    }

    pub(crate) fn restore_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }
}

/// Structural equality for round-trip checks. The realized connection set is
/// derived data, so it is compared order-insensitively; the port-owner index
/// follows the nodes and is not compared at all.
impl PartialEq for GraphDocument {
    fn eq(&self, other: &Self) -> bool {
        if self.nodes != other.nodes || self.groups != other.groups {
            return false;
        }
        let mut mine: Vec<&Connection> = self.connections.iter().collect();
        let mut theirs: Vec<&Connection> = other.connections.iter().collect();
        mine.sort();
        theirs.sort();
        mine == theirs
    }
}

fn mint_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_name(kind: &str, id: &str) -> String {
    let short = kind.rsplit(['.', ':']).next().unwrap_or(kind);
    let prefix: String = id.chars().take(4).collect();
    format!("{short}_{prefix}")
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

fn unknown_node(node_id: &str) -> GraphError {
    GraphError::UnknownNode {
        node_id: node_id.to_string(),
    }
}

fn unknown_port(port_id: &str) -> GraphError {
    GraphError::UnknownPort {
        port_id: port_id.to_string(),
    }
}

fn unknown_group(group_id: &str) -> GraphError {
    GraphError::UnknownGroup {
        group_id: group_id.to_string(),
    }
}
