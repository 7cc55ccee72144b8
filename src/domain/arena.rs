//! Arena-based cost/profit tree.

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::node::{NodeData, NodeKind};

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Cost/profit payload for this node
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in creation order
    pub children: Vec<Index>,
}

/// Arena-based tree holding the root, its groups and their items.
///
/// Nodes are never removed, so every `Index` handed out stays valid for the
/// lifetime of the tree.
#[derive(Debug, Clone)]
pub struct TreeArena {
    arena: Arena<TreeNode>,
    root: Index,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    /// Create a tree containing only the root sentinel.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            data: NodeData::root(),
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    #[instrument(level = "trace", skip(self, data), fields(id = data.id))]
    pub fn insert_node(&mut self, data: NodeData, parent: Index) -> Index {
        let node_idx = self.arena.insert(TreeNode {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.push(node_idx);
        }
        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Index {
        self.root
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True when the tree holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 1
    }

    /// Pre-order traversal starting at the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Every node except the root, in pre-order (which is creation order).
    pub fn descendants(&self) -> impl Iterator<Item = (Index, &TreeNode)> + '_ {
        self.iter().skip(1)
    }

    /// Group nodes in row order.
    pub fn groups(&self) -> &[Index] {
        &self.arena[self.root].children
    }

    /// Item nodes sharing `idx`'s parent, excluding `idx` itself.
    pub fn siblings(&self, idx: Index) -> Vec<Index> {
        self.get_node(idx)
            .and_then(|node| node.parent)
            .and_then(|parent| self.get_node(parent))
            .map(|parent| {
                parent
                    .children
                    .iter()
                    .copied()
                    .filter(|&child| child != idx)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.arena
            .iter()
            .filter(|(_, node)| node.data.kind == kind)
            .count()
    }

    /// Render the tree for display, one line per node.
    pub fn to_termtree(&self) -> Tree<String> {
        fn build(arena: &TreeArena, idx: Index) -> Tree<String> {
            let node = &arena.arena[idx];
            let leaves = node.children.iter().map(|&child| build(arena, child));
            Tree::new(node.data.to_string()).with_leaves(leaves)
        }
        build(self, self.root)
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        Self {
            arena,
            stack: vec![arena.root],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::Position;

    fn sample() -> (TreeArena, Index, Index, Index) {
        let mut tree = TreeArena::new();
        let root = tree.root();
        let pos = Position { row: 0, column: 0 };
        let group = tree.insert_node(NodeData::new(1, NodeKind::Group, 2, 0, 0, pos), root);
        let a = tree.insert_node(NodeData::new(2, NodeKind::Item, 3, 9, 2, pos), group);
        let b = tree.insert_node(NodeData::new(3, NodeKind::Item, 4, 8, 2, pos), group);
        (tree, group, a, b)
    }

    #[test]
    fn test_descendants_follow_creation_order() {
        let (tree, _, _, _) = sample();
        let ids: Vec<_> = tree.descendants().map(|(_, n)| n.data.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_siblings_exclude_self() {
        let (tree, _, a, b) = sample();
        assert_eq!(tree.siblings(a), vec![b]);
        assert_eq!(tree.siblings(b), vec![a]);
    }

    #[test]
    fn test_new_tree_holds_only_root() {
        let tree = TreeArena::new();
        assert!(tree.is_empty());
        assert!(tree.groups().is_empty());
        assert_eq!(tree.iter().count(), 1);
    }

    #[test]
    fn test_termtree_renders_all_nodes() {
        let (tree, _, _, _) = sample();
        let rendered = tree.to_termtree().to_string();
        assert!(rendered.starts_with("root"));
        assert_eq!(rendered.matches("item #").count(), 2);
        assert_eq!(rendered.matches("group #").count(), 1);
    }
}
