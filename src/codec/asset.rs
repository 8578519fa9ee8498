use crate::error::AssetError;
use crate::model::{GroupModel, NodeModel};
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

/// The serialized form of a graph document: plain records with stable string
/// ids. Nodes embed their ports in authored order, and every port records its
/// connections as `(node id, port id)` pairs rather than live references.
///
/// The same asset moves between a pretty JSON text encoding (used for files)
/// and a compact bincode byte encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphAsset {
    pub nodes: Vec<NodeModel>,
    pub groups: Vec<GroupModel>,
}

impl GraphAsset {
    pub fn to_json(&self) -> Result<String, AssetError> {
        serde_json::to_string_pretty(self).map_err(|e| AssetError::Json(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        serde_json::from_str(json).map_err(|e| AssetError::Json(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, AssetError> {
        encode_to_vec(self, standard()).map_err(|e| AssetError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        decode_from_slice(bytes, standard())
            .map(|(asset, _)| asset) // bincode 2 returns a tuple (data, bytes_read)
            .map_err(|e| AssetError::Decode(e.to_string()))
    }

    /// Saves the asset to a file as pretty JSON.
    pub fn save(&self, path: &str) -> Result<(), AssetError> {
        let json = self.to_json()?;
        let mut file = fs::File::create(path)
            .map_err(|e| AssetError::Io(format!("Could not create file '{}': {}", path, e)))?;
        file.write_all(json.as_bytes())
            .map_err(|e| AssetError::Io(format!("Could not write to file '{}': {}", path, e)))?;
        Ok(())
    }

    /// Loads an asset from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, AssetError> {
        let mut file = fs::File::open(path)
            .map_err(|e| AssetError::Io(format!("Could not open file '{}': {}", path, e)))?;
        let mut json = String::new();
        file.read_to_string(&mut json)
            .map_err(|e| AssetError::Io(format!("Could not read from file '{}': {}", path, e)))?;
        Self::from_json(&json)
    }
}
