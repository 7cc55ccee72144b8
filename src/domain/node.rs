//! Domain entities: tree nodes and their selection state

use std::fmt;

/// Role of a node in the two-level hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Sentinel, never selectable
    Root,
    /// Precedence constraint whose cost unlocks its items
    Group,
    /// Selectable reward, counted only when its group is unlocked
    Item,
}

/// Selection state of a node.
///
/// Ordered `Rejected < Unset < Selected`, so "not yet unlocked" is
/// `state < Selected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SelectionState {
    Rejected,
    Unset,
    Selected,
}

impl fmt::Display for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SelectionState::Rejected => "rejected",
            SelectionState::Unset => "unset",
            SelectionState::Selected => "selected",
        };
        f.write_str(label)
    }
}

/// Cell of the input tables a node was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

/// Cost/profit payload of a tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Sequential id in creation order, root is 0
    pub id: usize,
    pub kind: NodeKind,
    /// Cost as read from the cost table
    pub declared_cost: u64,
    /// Cumulative cost: declared cost plus the parent's cumulative cost,
    /// adjusted by amortization while solving
    pub cost: u64,
    pub profit: u64,
    /// profit / cost, 0 when cost is 0
    pub ratio: f64,
    pub state: SelectionState,
    /// None for the root
    pub position: Option<Position>,
}

impl NodeData {
    pub fn root() -> Self {
        Self {
            id: 0,
            kind: NodeKind::Root,
            declared_cost: 0,
            cost: 0,
            profit: 0,
            ratio: 0.0,
            state: SelectionState::Unset,
            position: None,
        }
    }

    /// Create a group or item node. `parent_cost` is the parent's cumulative
    /// cost at creation time.
    pub fn new(
        id: usize,
        kind: NodeKind,
        declared_cost: u64,
        profit: u64,
        parent_cost: u64,
        position: Position,
    ) -> Self {
        let mut data = Self {
            id,
            kind,
            declared_cost,
            cost: declared_cost + parent_cost,
            profit,
            ratio: 0.0,
            state: SelectionState::Unset,
            position: Some(position),
        };
        data.update_ratio();
        data
    }

    pub fn update_ratio(&mut self) {
        self.ratio = if self.cost == 0 {
            0.0
        } else {
            self.profit as f64 / self.cost as f64
        };
    }

    pub fn is_candidate(&self) -> bool {
        self.kind != NodeKind::Root && self.state == SelectionState::Unset && self.profit > 0
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Root => write!(f, "root"),
            NodeKind::Group | NodeKind::Item => {
                let label = if self.kind == NodeKind::Group {
                    "group"
                } else {
                    "item"
                };
                write!(
                    f,
                    "{} #{} (cost {}, profit {}, ratio {:.3}, {})",
                    label, self.id, self.cost, self.profit, self.ratio, self.state
                )
            }
        }
    }
}
