use crate::document::{GraphDocument, mint_id};
use crate::error::GraphError;
use crate::model::{PortConfig, PortModel, PortSide, tags};

/// Label carried by conditional ports created through the chain gesture.
pub const CONDITIONAL_PORT_LABEL: &str = "If(bool)";

impl GraphDocument {
    /// Adds a conditional port to a node's chain: a removable, bool-tagged,
    /// multi-capacity input.
    ///
    /// `source` names the conditional port to chain beneath; `None` asks for
    /// the chain root, which attaches beneath the node's gate port and fails
    /// with [`GraphError::InvalidPortConfig`] when no output allows new
    /// conditionals. A slot that is already occupied returns the occupying
    /// port unchanged, so a chain never grows two links for one source.
    pub fn add_conditional_port(
        &mut self,
        node_id: &str,
        source: Option<&str>,
    ) -> Result<&PortModel, GraphError> {
        let config = PortConfig::input(CONDITIONAL_PORT_LABEL, tags::BOOL)
            .with_removable(true)
            .with_conditional(source.map(str::to_string));
        self.create_port(node_id, config)
    }

    /// Validates and attaches a conditional port config. `create_port` routes
    /// every `conditional` config through here.
    pub(crate) fn attach_conditional(
        &mut self,
        node_id: &str,
        config: PortConfig,
    ) -> Result<&PortModel, GraphError> {
        let node = self.find_node(node_id)?;
        let source = config.conditional_source.clone();

        if let Some(occupied) = node.conditional_for_source(source.as_deref()) {
            let occupied_id = occupied.id.clone();
            tracing::debug!(node = %node_id, port = %occupied_id, "conditional slot already occupied");
            return self.find_port(&occupied_id);
        }
        match source.as_deref() {
            None => {
                if node.gate_port().is_none() {
                    return Err(GraphError::InvalidPortConfig {
                        node_id: node_id.to_string(),
                        reason: "a conditional chain root needs an output port that allows new conditionals"
                            .to_string(),
                    });
                }
            }
            Some(source_id) => {
                if !node.conditional_ports().any(|port| port.id == source_id) {
                    return Err(GraphError::InvalidPortConfig {
                        node_id: node_id.to_string(),
                        reason: format!(
                            "conditional source '{source_id}' is not a conditional port of this node"
                        ),
                    });
                }
            }
        }

        // Chain links always live on the input side, whatever the config said.
        let mut config = config;
        config.side = PortSide::Input;
        let port = PortModel::from_config(mint_id(), config);
        tracing::debug!(node = %node_id, port = %port.id, source = ?source, "conditional port added");
        self.insert_port(node_id, port)
    }

    /// Re-points any chain link that referenced `port_id` to the removed
    /// link's own source. Removing the root promotes the next link to root;
    /// removing a middle link joins its neighbors. Sources never dangle.
    pub(crate) fn splice_chain(&mut self, node_id: &str, port_id: &str) -> Result<(), GraphError> {
        let node = self.find_node_mut(node_id)?;
        let Some(removed) = node.port(port_id) else {
            return Ok(());
        };
        if !removed.conditional {
            return Ok(());
        }
        let inherited = removed.conditional_source.clone();

        for port in node.inputs.iter_mut().chain(node.outputs.iter_mut()) {
            if port.conditional && port.conditional_source.as_deref() == Some(port_id) {
                port.conditional_source = inherited.clone();
            }
        }
        Ok(())
    }
}
