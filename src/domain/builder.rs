//! Tree builder turning cost/profit tables into the two-level tree.

use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::error::DomainError;
use crate::domain::node::{NodeData, NodeKind, Position};
use crate::domain::table::Table;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Constructs the cost/profit tree from two equally shaped tables.
///
/// Each row becomes one group: its last cell is the group's own
/// (cost, profit), the preceding cells are the group's items.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    next_id: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    /// Build the tree. Shape mismatches fail before any node is created.
    #[instrument(level = "debug", skip(self, costs, profits), fields(rows = costs.len()))]
    pub fn build(&mut self, costs: &Table, profits: &Table) -> TreeResult<TreeArena> {
        Self::validate_shape(costs, profits)?;

        self.next_id = 0;
        let mut tree = TreeArena::new();
        let root = tree.root();

        for (row, (cost_row, profit_row)) in costs.rows().iter().zip(profits.rows()).enumerate() {
            // validate_shape guarantees non-empty rows
            let Some((&group_cost, item_costs)) = cost_row.split_last() else {
                return Err(DomainError::EmptyRow { row });
            };
            let Some((&group_profit, item_profits)) = profit_row.split_last() else {
                return Err(DomainError::EmptyRow { row });
            };

            let group_data = NodeData::new(
                self.next_id(),
                NodeKind::Group,
                group_cost,
                group_profit,
                0,
                Position {
                    row,
                    column: item_costs.len(),
                },
            );
            let group_total = group_data.cost;
            let group = tree.insert_node(group_data, root);

            for (column, (&cost, &profit)) in item_costs.iter().zip(item_profits).enumerate() {
                let item = NodeData::new(
                    self.next_id(),
                    NodeKind::Item,
                    cost,
                    profit,
                    group_total,
                    Position { row, column },
                );
                tree.insert_node(item, group);
            }
        }

        debug!(
            groups = tree.groups().len(),
            nodes = tree.len(),
            "built cost/profit tree"
        );
        Ok(tree)
    }

    fn next_id(&mut self) -> usize {
        self.next_id += 1;
        self.next_id
    }

    fn validate_shape(costs: &Table, profits: &Table) -> TreeResult<()> {
        if costs.len() != profits.len() {
            return Err(DomainError::RowCountMismatch {
                cost_rows: costs.len(),
                profit_rows: profits.len(),
            });
        }
        for (row, (cost_row, profit_row)) in costs.rows().iter().zip(profits.rows()).enumerate() {
            if cost_row.len() != profit_row.len() {
                return Err(DomainError::MalformedInput {
                    row,
                    cost_len: cost_row.len(),
                    profit_len: profit_row.len(),
                });
            }
            if cost_row.is_empty() {
                return Err(DomainError::EmptyRow { row });
            }
        }
        Ok(())
    }
}
