//! Arena-based tree building.
//!
//! All nodes and UEs of a year are loaded once into maps; materializing
//! a subtree then only walks the maps.

use std::collections::HashMap;

use uuid::Uuid;

use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_entity::node::{Node, NodeTree, NodeWithChildIds, Ue};

/// UE leaves grouped by parent node id.
pub type UeMap = HashMap<Uuid, Vec<Ue>>;

/// Nodes of one academic year keyed by id, with each node's child ids.
#[derive(Debug, Clone, Default)]
pub struct NodeMap {
    nodes: HashMap<Uuid, Node>,
    children: HashMap<Uuid, Vec<Uuid>>,
    root: Option<Uuid>,
}

impl NodeMap {
    /// Index `nodes`. Child order follows the input order.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let mut map = Self::default();
        for node in nodes {
            match node.parent_id {
                Some(parent_id) => map.children.entry(parent_id).or_default().push(node.id),
                None => map.root = Some(node.id),
            }
            map.nodes.insert(node.id, node);
        }
        map
    }

    /// Look up a node.
    pub fn get(&self, id: &Uuid) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Drop a node from the arena. Parents keep listing its id.
    pub fn remove(&mut self, id: &Uuid) -> Option<Node> {
        self.nodes.remove(id)
    }

    /// Ids of the immediate children of `id`.
    pub fn child_ids(&self, id: &Uuid) -> &[Uuid] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// The root node of the year.
    pub fn root(&self) -> Option<&Node> {
        self.root.and_then(|id| self.nodes.get(&id))
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `node_id` is `ancestor_id` or lies below it.
    pub fn is_within(&self, node_id: Uuid, ancestor_id: Uuid) -> bool {
        let mut current = Some(node_id);
        // Bounded walk so a corrupted parent chain cannot loop forever.
        for _ in 0..=self.nodes.len() {
            match current {
                Some(id) if id == ancestor_id => return true,
                Some(id) => current = self.nodes.get(&id).and_then(|n| n.parent_id),
                None => return false,
            }
        }
        false
    }
}

/// Group UEs by their parent node, keeping input order.
pub fn group_ues_by_parent(ues: Vec<Ue>) -> UeMap {
    let mut map = UeMap::new();
    for ue in ues {
        map.entry(ue.parent_id).or_default().push(ue);
    }
    map
}

/// Materialize the subtree rooted at `node` from the arena.
///
/// Child ids missing from the arena (deleted concurrently) are skipped.
pub fn build_tree_recursive(node: &Node, node_map: &NodeMap, ue_map: &UeMap) -> NodeTree {
    let children = node_map
        .child_ids(&node.id)
        .iter()
        .filter_map(|child_id| node_map.get(child_id))
        .map(|child| build_tree_recursive(child, node_map, ue_map))
        .collect();

    NodeTree {
        id: node.id,
        name: node.name.clone(),
        academic_year: node.academic_year,
        children,
        ues: ue_map.get(&node.id).cloned().unwrap_or_default(),
    }
}

/// Single-level view of `node`: its own fields plus immediate child ids.
pub fn build_node_with_child_id(
    node: &Node,
    child_node_ids: Vec<Uuid>,
    ues: &[Ue],
) -> NodeWithChildIds {
    NodeWithChildIds {
        id: node.id,
        name: node.name.clone(),
        parent_id: node.parent_id,
        academic_year: node.academic_year,
        child_node_ids,
        ue_ids: ues.iter().map(|ue| ue.id).collect(),
    }
}

/// A node may only be deleted once it has no child nodes and no UEs.
pub fn ensure_deletable(node: &Node, child_nodes: usize, ues: usize) -> AppResult<()> {
    if child_nodes > 0 || ues > 0 {
        return Err(AppError::cannot_delete_children(format!(
            "Node '{}' still has {child_nodes} child node(s) and {ues} UE(s)",
            node.name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use coursehub_core::error::ErrorKind;

    use super::*;

    fn node(name: &str, parent: Option<&Node>) -> Node {
        Node {
            id: Uuid::new_v4(),
            name: name.to_string(),
            parent_id: parent.map(|p| p.id),
            academic_year: 2024,
            created_at: Utc::now(),
        }
    }

    fn ue(name: &str, parent: &Node) -> Ue {
        Ue {
            id: Uuid::new_v4(),
            name: name.to_string(),
            apogee_code: None,
            parent_id: parent.id,
            academic_year: parent.academic_year,
        }
    }

    struct Sample {
        root: Node,
        a: Node,
        b: Node,
        c: Node,
    }

    /// root -> [A, B], B -> [C]
    fn sample() -> Sample {
        let root = node("root", None);
        let a = node("A", Some(&root));
        let b = node("B", Some(&root));
        let c = node("C", Some(&b));
        Sample { root, a, b, c }
    }

    fn arena(s: &Sample) -> NodeMap {
        NodeMap::from_nodes(vec![s.root.clone(), s.a.clone(), s.b.clone(), s.c.clone()])
    }

    #[test]
    fn test_build_full_tree() {
        let s = sample();
        let map = arena(&s);
        let ues = group_ues_by_parent(vec![ue("Algebra", &s.a)]);

        let tree = build_tree_recursive(map.root().unwrap(), &map, &ues);

        assert_eq!(tree.id, s.root.id);
        let names: Vec<_> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(tree.children[0].ues.len(), 1);
        assert_eq!(tree.children[0].ues[0].name, "Algebra");
        assert_eq!(tree.children[1].children.len(), 1);
        assert_eq!(tree.children[1].children[0].id, s.c.id);
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_absent_child_is_skipped() {
        let s = sample();
        let mut map = arena(&s);
        map.remove(&s.c.id);

        let tree = build_tree_recursive(map.root().unwrap(), &map, &UeMap::new());

        assert_eq!(map.child_ids(&s.b.id), [s.c.id]);
        let b = &tree.children[1];
        assert_eq!(b.id, s.b.id);
        assert!(b.children.is_empty());
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_subtree_from_inner_node() {
        let s = sample();
        let map = arena(&s);
        let tree = build_tree_recursive(&s.b, &map, &UeMap::new());
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].name, "C");
    }

    #[test]
    fn test_single_level_view() {
        let s = sample();
        let map = arena(&s);
        let leaf = ue("Analysis", &s.root);
        let view = build_node_with_child_id(
            &s.root,
            map.child_ids(&s.root.id).to_vec(),
            std::slice::from_ref(&leaf),
        );
        assert_eq!(view.child_node_ids, [s.a.id, s.b.id]);
        assert_eq!(view.ue_ids, [leaf.id]);
        assert_eq!(view.parent_id, None);
    }

    #[test]
    fn test_is_within() {
        let s = sample();
        let map = arena(&s);
        assert!(map.is_within(s.c.id, s.b.id));
        assert!(map.is_within(s.c.id, s.root.id));
        assert!(map.is_within(s.b.id, s.b.id));
        assert!(!map.is_within(s.a.id, s.b.id));
    }

    #[test]
    fn test_ensure_deletable() {
        let s = sample();
        assert_eq!(
            ensure_deletable(&s.b, 1, 0).unwrap_err().kind,
            ErrorKind::CannotDeleteChildren
        );
        assert_eq!(
            ensure_deletable(&s.a, 0, 2).unwrap_err().kind,
            ErrorKind::CannotDeleteChildren
        );
        assert!(ensure_deletable(&s.c, 0, 0).is_ok());
    }
}
