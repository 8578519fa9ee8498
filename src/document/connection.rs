use crate::document::GraphDocument;
use crate::error::GraphError;
use crate::model::{PortRef, PortSide};
use serde::{Deserialize, Serialize};

/// A realized connection: an output port feeding an input port.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: PortRef,
    pub to: PortRef,
}

impl Connection {
    pub fn new(from: PortRef, to: PortRef) -> Self {
        Self { from, to }
    }

    pub fn touches_node(&self, node_id: &str) -> bool {
        self.from.node_id == node_id || self.to.node_id == node_id
    }

    pub fn touches_port(&self, port_id: &str) -> bool {
        self.from.port_id == port_id || self.to.port_id == port_id
    }
}

impl GraphDocument {
    /// Connects two ports, accepting the endpoints in either order.
    ///
    /// Returns `Ok(true)` when the pair is connected afterwards, including
    /// the already-connected no-op, and `Ok(false)` when the pair is
    /// incompatible by side, type or capacity. Incompatibility is an expected
    /// outcome of exploratory drag gestures, not an error; errors are
    /// reserved for refs that do not resolve.
    pub fn connect(&mut self, a: &PortRef, b: &PortRef) -> Result<bool, GraphError> {
        let port_a = self.resolve_ref(a)?;
        let port_b = self.resolve_ref(b)?;

        if port_a.is_connected_to(b) {
            return Ok(true);
        }
        if !(port_a.can_connect_to(port_b) && port_b.can_connect_to(port_a)) {
            tracing::debug!(a = %a, b = %b, "connection rejected");
            return Ok(false);
        }
        let (from, to) = if port_a.side == PortSide::Output {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        };

        self.find_port_mut(&from.port_id)?.attach(to.clone());
        self.find_port_mut(&to.port_id)?.attach(from.clone());
        tracing::debug!(from = %from, to = %to, "connection created");
        self.connections.push(Connection::new(from, to));
        Ok(true)
    }

    /// Removes the connection between two ports, in either endpoint order.
    /// Unconnected pairs are a no-op.
    pub fn disconnect(&mut self, a: &PortRef, b: &PortRef) -> Result<(), GraphError> {
        self.resolve_ref(a)?;
        self.resolve_ref(b)?;

        self.find_port_mut(&a.port_id)?.detach(b);
        self.find_port_mut(&b.port_id)?.detach(a);
        let before = self.connections.len();
        self.connections.retain(|connection| {
            !((connection.from == *a && connection.to == *b)
                || (connection.from == *b && connection.to == *a))
        });
        if self.connections.len() < before {
            tracing::debug!(a = %a, b = %b, "connection removed");
        }
        Ok(())
    }

    /// Disconnects every connection of a node, optionally restricted to one
    /// side. The ports themselves stay in place.
    pub fn disconnect_node_ports(
        &mut self,
        node_id: &str,
        side: Option<PortSide>,
    ) -> Result<(), GraphError> {
        let node = self.find_node(node_id)?;
        let mut pairs: Vec<(PortRef, PortRef)> = Vec::new();
        for port in node.all_ports() {
            if side.is_some_and(|wanted| wanted != port.side) {
                continue;
            }
            let own = PortRef::new(node_id, port.id.clone());
            for peer in &port.connections {
                pairs.push((own.clone(), peer.clone()));
            }
        }
        for (own, peer) in pairs {
            self.disconnect(&own, &peer)?;
        }
        Ok(())
    }
}
