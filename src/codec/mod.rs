use crate::document::{Connection, GraphDocument};
use crate::error::AssetError;
use crate::model::{NodeModel, PortCapacity, PortModel, PortRef, PortSide};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

mod asset;

pub use asset::GraphAsset;

/// Snapshots a document into its asset form.
///
/// Nodes and groups are sorted by id so the same document always produces
/// the same asset; port order inside each node is authored order and is
/// taken verbatim.
pub fn serialize(document: &GraphDocument) -> GraphAsset {
    let nodes = document
        .nodes()
        .cloned()
        .sorted_by(|a, b| a.id.cmp(&b.id))
        .collect();
    let groups = document
        .groups()
        .cloned()
        .sorted_by(|a, b| a.id.cmp(&b.id))
        .collect();
    GraphAsset { nodes, groups }
}

/// Reconstructs a document from an asset, rebuilding the port index and the
/// realized connection set by id resolution.
///
/// Loading is all-or-nothing: any unresolvable or inconsistent reference
/// rejects the whole asset with [`AssetError::CorruptAsset`] and nothing is
/// reconstructed. Recorded connections are not re-checked against the type
/// rules, matching the policy that ports retyped after the fact keep their
/// existing connections.
pub fn deserialize(asset: GraphAsset) -> Result<GraphDocument, AssetError> {
    validate(&asset)?;

    let mut document = GraphDocument::new();
    for group in asset.groups {
        document.restore_group(group);
    }
    for node in asset.nodes {
        document.restore_node(node);
    }

    // The realized set is derived from the output side of every recorded
    // pair; validation already proved the input side mirrors it.
    let mut pairs = Vec::new();
    for node in document.nodes().sorted_by(|a, b| a.id.cmp(&b.id)) {
        for port in &node.outputs {
            for peer in &port.connections {
                pairs.push(Connection::new(
                    PortRef::new(node.id.clone(), port.id.clone()),
                    peer.clone(),
                ));
            }
        }
    }
    for pair in pairs {
        document.restore_connection(pair);
    }
    Ok(document)
}

fn validate(asset: &GraphAsset) -> Result<(), AssetError> {
    let mut node_ids: AHashSet<&str> = AHashSet::new();
    for node in &asset.nodes {
        if !node_ids.insert(node.id.as_str()) {
            return Err(corrupt(format!("duplicate node id '{}'", node.id)));
        }
    }
    let mut group_ids: AHashSet<&str> = AHashSet::new();
    for group in &asset.groups {
        if !group_ids.insert(group.id.as_str()) {
            return Err(corrupt(format!("duplicate group id '{}'", group.id)));
        }
    }

    // Global port index; building it also rejects duplicate port ids and
    // ports stored under the wrong side list.
    let mut ports: AHashMap<&str, (&NodeModel, &PortModel)> = AHashMap::new();
    for node in &asset.nodes {
        for (side, list) in [
            (PortSide::Input, &node.inputs),
            (PortSide::Output, &node.outputs),
        ] {
            for port in list {
                if port.side != side {
                    return Err(corrupt(format!(
                        "port '{}' sits in the {} list of node '{}' but is marked {}",
                        port.id, side, node.id, port.side
                    )));
                }
                if ports.insert(port.id.as_str(), (node, port)).is_some() {
                    return Err(corrupt(format!("duplicate port id '{}'", port.id)));
                }
            }
        }
    }

    for node in &asset.nodes {
        if let Some(group_id) = &node.group_id {
            if !group_ids.contains(group_id.as_str()) {
                return Err(corrupt(format!(
                    "node '{}' references unknown group '{}'",
                    node.id, group_id
                )));
            }
        }
        validate_connections(node, &ports)?;
        validate_chain(node)?;
    }
    Ok(())
}

fn validate_connections(
    node: &NodeModel,
    ports: &AHashMap<&str, (&NodeModel, &PortModel)>,
) -> Result<(), AssetError> {
    for port in node.all_ports() {
        if port.value_tag.is_empty() {
            return Err(corrupt(format!("port '{}' has an empty value tag", port.id)));
        }
        if port.accepted.is_empty() {
            return Err(corrupt(format!(
                "port '{}' has an empty accepted tag set",
                port.id
            )));
        }
        if port.capacity == PortCapacity::Single && port.connections.len() > 1 {
            return Err(corrupt(format!(
                "single-capacity port '{}' records {} connections",
                port.id,
                port.connections.len()
            )));
        }

        let mut peers: AHashSet<(&str, &str)> = AHashSet::new();
        for peer in &port.connections {
            if !peers.insert((peer.node_id.as_str(), peer.port_id.as_str())) {
                return Err(corrupt(format!(
                    "port '{}' records a duplicate connection to '{}'",
                    port.id, peer
                )));
            }
            let Some((peer_node, peer_port)) = ports.get(peer.port_id.as_str()) else {
                return Err(corrupt(format!(
                    "port '{}' references unknown port '{}'",
                    port.id, peer.port_id
                )));
            };
            if peer_node.id != peer.node_id {
                return Err(corrupt(format!(
                    "connection from '{}' names node '{}' for port '{}', which belongs to node '{}'",
                    port.id, peer.node_id, peer.port_id, peer_node.id
                )));
            }
            if peer_port.side == port.side {
                return Err(corrupt(format!(
                    "ports '{}' and '{}' are both {} ports and cannot be connected",
                    port.id, peer_port.id, port.side
                )));
            }
            let back = PortRef::new(node.id.clone(), port.id.clone());
            if !peer_port.connections.contains(&back) {
                return Err(corrupt(format!(
                    "connection between '{}' and '{}' is recorded on one side only",
                    port.id, peer_port.id
                )));
            }
        }
    }
    Ok(())
}

fn validate_chain(node: &NodeModel) -> Result<(), AssetError> {
    let mut roots = 0usize;
    for port in node.all_ports() {
        if !port.conditional {
            if port.conditional_source.is_some() {
                return Err(corrupt(format!(
                    "non-conditional port '{}' carries a conditional source",
                    port.id
                )));
            }
            continue;
        }
        if port.side != PortSide::Input {
            return Err(corrupt(format!(
                "conditional port '{}' is not an input",
                port.id
            )));
        }
        match port.conditional_source.as_deref() {
            None => roots += 1,
            Some(source) => {
                if !node
                    .conditional_ports()
                    .any(|candidate| candidate.id == source)
                {
                    return Err(corrupt(format!(
                        "port '{}' chains beneath '{}', which is not a conditional port of node '{}'",
                        port.id, source, node.id
                    )));
                }
            }
        }
    }
    if roots > 1 {
        return Err(corrupt(format!(
            "node '{}' has {} conditional chain roots",
            node.id, roots
        )));
    }

    // Every link has to reach the root; a walk longer than the chain itself
    // means the sources loop.
    let sources: AHashMap<&str, Option<&str>> = node
        .conditional_ports()
        .map(|port| (port.id.as_str(), port.conditional_source.as_deref()))
        .collect();
    for start in sources.keys() {
        let mut current = *start;
        let mut steps = 0;
        while let Some(next) = sources.get(current).copied().flatten() {
            steps += 1;
            if steps > sources.len() {
                return Err(corrupt(format!(
                    "conditional chain on node '{}' never reaches its root",
                    node.id
                )));
            }
            current = next;
        }
    }
    Ok(())
}

fn corrupt(detail: String) -> AssetError {
    AssetError::CorruptAsset { detail }
}
