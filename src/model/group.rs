use crate::model::node::Position;
use serde::{Deserialize, Serialize};

/// A titled region nodes can be assigned to. Membership lives on the node
/// (`NodeModel::group_id`); deleting a group orphans its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupModel {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub position: Position,
}

impl GroupModel {
    pub(crate) fn new(id: String, kind: String, name: String, position: Position) -> Self {
        Self {
            id,
            kind,
            name,
            position,
        }
    }
}
