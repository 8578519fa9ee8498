//! Prelude module for convenient imports
//!
//! Re-exports the types and functions most hosts touch when embedding the
//! graph core, so a single glob import covers document authoring, the kind
//! catalog and asset persistence.
//!
//! # Example
//!
//! ```rust,no_run
//! use bunki::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let mut doc = GraphDocument::new();
//! let node = doc.create_node("dialogue.Speak", Position::default()).id.clone();
//! doc.create_port(&node, PortConfig::output("Next", "flow"))?;
//!
//! serialize(&doc).save("dialogue.graph.json")?;
//! let restored = deserialize(GraphAsset::from_file("dialogue.graph.json")?)?;
//! assert_eq!(doc, restored);
//! # Ok(())
//! # }
//! ```

// Document authoring
pub use crate::document::{CONDITIONAL_PORT_LABEL, Connection, GraphDocument};

// Model types
pub use crate::model::{
    FieldValue, GroupModel, NodeModel, PortCapacity, PortConfig, PortModel, PortRef, PortSide,
    Position, TypeTag, tags, tags_intersect,
};

// Node kind catalog
pub use crate::catalog::{CatalogEntry, KindDescriptor, NodeCatalog};

// Asset persistence
pub use crate::codec::{GraphAsset, deserialize, serialize};

// Error types
pub use crate::error::{AssetError, CatalogError, GraphError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
