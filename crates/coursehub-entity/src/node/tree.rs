//! Response shapes for hierarchical node reads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ue::Ue;

/// A fully materialized subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTree {
    /// Node ID.
    pub id: Uuid,
    /// Node name.
    pub name: String,
    /// Academic year.
    pub academic_year: i32,
    /// Child nodes, recursively materialized.
    pub children: Vec<NodeTree>,
    /// UE leaves attached directly to this node.
    pub ues: Vec<Ue>,
}

impl NodeTree {
    /// Total number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NodeTree::node_count).sum::<usize>()
    }
}

/// A single level of the hierarchy, for lazy expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeWithChildIds {
    /// Node ID.
    pub id: Uuid,
    /// Node name.
    pub name: String,
    /// Parent node ID.
    pub parent_id: Option<Uuid>,
    /// Academic year.
    pub academic_year: i32,
    /// IDs of the immediate child nodes.
    pub child_node_ids: Vec<Uuid>,
    /// IDs of the immediate UE leaves.
    pub ue_ids: Vec<Uuid>,
}
