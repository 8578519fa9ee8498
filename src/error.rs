use crate::model::PortSide;
use thiserror::Error;

/// Errors that can occur while mutating or querying a graph document.
#[derive(Error, Debug, Clone)]
pub enum GraphError {
    #[error("Invalid port configuration on node '{node_id}': {reason}")]
    InvalidPortConfig { node_id: String, reason: String },

    #[error("Node '{node_id}' is already at its minimum of {minimal} {side} port(s)")]
    BelowMinimalPorts {
        node_id: String,
        side: PortSide,
        minimal: usize,
    },

    #[error("Node '{node_id}' does not exist in this document")]
    UnknownNode { node_id: String },

    #[error("Port '{port_id}' does not exist in this document")]
    UnknownPort { port_id: String },

    #[error("Group '{group_id}' does not exist in this document")]
    UnknownGroup { group_id: String },
}

/// Errors that can occur while resolving node kinds or building the creation index.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("Node kind '{tag}' is not registered")]
    UnknownKind { tag: String },

    #[error("Node kind '{tag}' sits on a parent cycle and never reaches the base kind")]
    CyclicKind { tag: String },
}

/// Errors that can occur while encoding, decoding or loading a graph asset.
///
/// A load either reconstructs the complete document or nothing at all, so every
/// variant here means the in-memory document was left untouched.
#[derive(Error, Debug, Clone)]
pub enum AssetError {
    #[error("Corrupt asset: {detail}")]
    CorruptAsset { detail: String },

    #[error("Asset JSON error: {0}")]
    Json(String),

    #[error("Failed to encode asset bytes: {0}")]
    Encode(String),

    #[error("Failed to decode asset bytes: {0}")]
    Decode(String),

    #[error("Asset file error: {0}")]
    Io(String),
}
