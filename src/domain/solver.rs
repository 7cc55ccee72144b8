//! Greedy selection over the cost/profit tree.
//!
//! Each round picks the unset node with the best profit ratio, charges its
//! group's unlocking cost once, and rolls the pick back if the bound is
//! exceeded. Rejected items are never reconsidered.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::TreeArena;
use crate::domain::node::{NodeKind, SelectionState};

/// Outcome of a solver run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Weight of the selection, never above the bound
    pub total_cost: u64,
    /// Sum of profits over the selection, items and groups alike
    pub total_profit: u64,
    /// Selected nodes in the order they were appended
    pub selection: Vec<Index>,
    /// Number of selection rounds
    pub iterations: usize,
}

impl Solution {
    pub fn contains(&self, idx: Index) -> bool {
        self.selection.contains(&idx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shift {
    Amortize,
    Restore,
}

/// Greedy solver owning the tree for the duration of a run.
#[derive(Debug)]
pub struct GreedySolver {
    tree: TreeArena,
    bound: u64,
    weight: u64,
    selection: Vec<Index>,
    profit: u64,
    /// Groups whose items are amortized, keyed to the item that paid for them
    unlocked_by: HashMap<Index, Index>,
}

impl GreedySolver {
    pub fn new(tree: TreeArena, bound: u64) -> Self {
        Self {
            tree,
            bound,
            weight: 0,
            selection: Vec::new(),
            profit: 0,
            unlocked_by: HashMap::new(),
        }
    }

    pub fn tree(&self) -> &TreeArena {
        &self.tree
    }

    pub fn into_tree(self) -> TreeArena {
        self.tree
    }

    pub fn selection(&self) -> &[Index] {
        &self.selection
    }

    /// Run until no unset node with positive profit remains.
    #[instrument(level = "debug", skip(self), fields(bound = self.bound, nodes = self.tree.len()))]
    pub fn solve(&mut self) -> Solution {
        let mut iterations = 0;

        while let Some(best) = self.best_candidate() {
            iterations += 1;
            self.add_item(best);

            let weight = self.selection_weight();
            if weight > self.bound {
                debug!(
                    id = self.tree.get_node(best).map(|n| n.data.id),
                    weight,
                    bound = self.bound,
                    "rolling back: bound exceeded"
                );
                self.delete_item(best);
            } else {
                debug!(
                    id = self.tree.get_node(best).map(|n| n.data.id),
                    weight,
                    "kept"
                );
                self.weight = weight;
            }
        }

        self.profit = self
            .selection
            .iter()
            .filter_map(|&idx| self.tree.get_node(idx))
            .map(|node| node.data.profit)
            .sum();

        debug!(
            iterations,
            total_cost = self.weight,
            total_profit = self.profit,
            selected = self.selection.len(),
            "solve finished"
        );

        Solution {
            total_cost: self.weight,
            total_profit: self.profit,
            selection: self.selection.clone(),
            iterations,
        }
    }

    /// Unset node with positive profit and the highest ratio.
    ///
    /// Ties go to the candidate that comes last in creation order, which is
    /// what picking the last element of a stable ascending sort yields.
    /// `max_by` already returns the last of several equal maxima.
    pub fn best_candidate(&self) -> Option<Index> {
        self.tree
            .descendants()
            .filter(|(_, node)| node.data.is_candidate())
            .max_by(|(_, a), (_, b)| a.data.ratio.total_cmp(&b.data.ratio))
            .map(|(idx, _)| idx)
    }

    /// Sum of cumulative cost over the current selection.
    pub fn selection_weight(&self) -> u64 {
        self.selection
            .iter()
            .filter_map(|&idx| self.tree.get_node(idx))
            .map(|node| node.data.cost)
            .sum()
    }

    /// Select `idx`, unlocking its group if that has not happened yet.
    ///
    /// Unlocking moves the group's cost out of the item and onto the group's
    /// own selection entry, and lowers the cost of every sibling that can
    /// still be picked. A group picked on its own sits directly under the
    /// root and leaves its items' costs alone.
    #[instrument(level = "trace", skip(self))]
    pub fn add_item(&mut self, idx: Index) {
        let Some(node) = self.tree.get_node_mut(idx) else {
            return;
        };
        if node.data.kind == NodeKind::Root {
            return;
        }
        node.data.state = SelectionState::Selected;
        let kind = node.data.kind;
        let parent = node.parent;
        self.selection.push(idx);

        if kind == NodeKind::Item {
            if let Some(group) = parent {
                self.unlock_group(group, idx);
            }
        }
    }

    /// Roll back the selection of `idx` and reject it permanently.
    ///
    /// When no sibling of a rolled back item is selected, its group is
    /// demoted to unset and any amortization it paid for is undone.
    #[instrument(level = "trace", skip(self))]
    pub fn delete_item(&mut self, idx: Index) {
        let Some(node) = self.tree.get_node(idx) else {
            return;
        };
        let kind = node.data.kind;
        let parent = node.parent;

        match kind {
            NodeKind::Item => {
                if let Some(group) = parent {
                    if !self.any_sibling_selected(idx) {
                        self.demote_group(group, idx);
                    }
                }
            }
            NodeKind::Group => {}
            NodeKind::Root => return,
        }

        if let Some(node) = self.tree.get_node_mut(idx) {
            node.data.state = SelectionState::Rejected;
        }
        self.selection.retain(|&selected| selected != idx);
    }

    fn any_sibling_selected(&self, item: Index) -> bool {
        self.tree.siblings(item).iter().any(|&sibling| {
            self.tree
                .get_node(sibling)
                .is_some_and(|n| n.data.state == SelectionState::Selected)
        })
    }

    fn unlock_group(&mut self, group: Index, item: Index) {
        let Some(group_node) = self.tree.get_node(group) else {
            return;
        };
        if group_node.data.state >= SelectionState::Selected {
            return;
        }
        let group_cost = group_node.data.cost;

        if let Some(item_node) = self.tree.get_node_mut(item) {
            item_node.data.cost -= group_cost;
            item_node.data.update_ratio();
        }
        if let Some(group_node) = self.tree.get_node_mut(group) {
            group_node.data.state = SelectionState::Selected;
        }
        self.selection.push(group);
        self.unlocked_by.insert(group, item);
        trace!(?group, ?item, group_cost, "group unlocked");

        self.shift_children(group, item, Shift::Amortize);
    }

    /// Put `group` back to unset after `item` was rolled back.
    ///
    /// A rejected group comes back too: it becomes a candidate again if it
    /// carries profit.
    fn demote_group(&mut self, group: Index, item: Index) {
        let Some(group_node) = self.tree.get_node_mut(group) else {
            return;
        };
        group_node.data.state = SelectionState::Unset;
        let group_cost = group_node.data.cost;
        self.selection.retain(|&selected| selected != group);
        trace!(?group, ?item, group_cost, "group demoted");

        // Only the item that unlocked the group carries an amortization,
        // and it is rolled back in the round that added it.
        let Some(payer) = self.unlocked_by.remove(&group) else {
            return;
        };
        debug_assert_eq!(payer, item);

        self.shift_children(group, payer, Shift::Restore);
        if let Some(item_node) = self.tree.get_node_mut(payer) {
            item_node.data.cost += group_cost;
            item_node.data.update_ratio();
        }
    }

    /// Move the group's cost out of (or back into) every child of `group`
    /// other than `skip` that has not been rejected.
    fn shift_children(&mut self, group: Index, skip: Index, shift: Shift) {
        let Some(group_node) = self.tree.get_node(group) else {
            return;
        };
        let group_cost = group_node.data.cost;
        let children: Vec<Index> = group_node
            .children
            .iter()
            .copied()
            .filter(|&child| child != skip)
            .collect();

        for child in children {
            let Some(node) = self.tree.get_node_mut(child) else {
                continue;
            };
            if node.data.state == SelectionState::Rejected {
                continue;
            }
            match shift {
                Shift::Amortize => node.data.cost -= group_cost,
                Shift::Restore => node.data.cost += group_cost,
            }
            node.data.update_ratio();
            trace!(id = node.data.id, cost = node.data.cost, ratio = node.data.ratio, ?shift, "sibling cost shifted");
        }
    }
}
