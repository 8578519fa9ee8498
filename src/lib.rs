//! # Bunki - Branching Dialogue Graph Core
//!
//! **Bunki** is the authoring core of a node-based editor for branching
//! dialogue and behavior trees. It owns the graph data model (typed nodes,
//! typed ports, groups), enforces the connection rules (side, type
//! intersection, capacity), manages conditional "if" port chains and
//! persists whole documents to a durable asset format. Rendering, menus and
//! drag handling stay in the presentation layer; it calls into the core with
//! intents and redraws from the returned models.
//!
//! ## Core Workflow
//!
//! 1.  **Register Kinds**: Fill a `NodeCatalog` with the node kinds your
//!     editor offers and derive the creation palette from `build_index`.
//! 2.  **Author**: Create nodes, ports and groups through `GraphDocument`'s
//!     factories, then wire ports with `connect`. Incompatible pairs are
//!     reported as a soft `false`, not an error.
//! 3.  **Branch**: Grow per-node conditional chains with
//!     `add_conditional_port`; the document keeps the chain well-formed
//!     through every deletion.
//! 4.  **Persist**: Snapshot the document with `serialize`, store the
//!     `GraphAsset` as JSON or bincode bytes, and get the identical document
//!     back through `deserialize`.
//!
//! ## Quick Start
//!
//! ```rust
//! use bunki::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut doc = GraphDocument::new();
//!
//!     // Two lines of dialogue on the canvas.
//!     let speak = doc.create_node("dialogue.Speak", Position::new(80.0, 120.0)).id.clone();
//!     let reply = doc.create_node("dialogue.Speak", Position::new(420.0, 120.0)).id.clone();
//!
//!     // A flow output on one and a flow input on the other.
//!     let next = doc.create_port(&speak, PortConfig::output("Next", "flow"))?.id.clone();
//!     let prev = doc.create_port(&reply, PortConfig::input("Previous", "flow"))?.id.clone();
//!
//!     // Wire them up. A pair that fails the side/type/capacity rules would
//!     // come back as Ok(false) instead of an error.
//!     let from = doc.port_ref(&next)?;
//!     let to = doc.port_ref(&prev)?;
//!     assert!(doc.connect(&from, &to)?);
//!
//!     // Round-trip through the asset form without losing anything.
//!     let asset = serialize(&doc);
//!     let restored = deserialize(asset)?;
//!     assert_eq!(doc, restored);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod codec;
pub mod document;
pub mod error;
pub mod model;
pub mod prelude;
