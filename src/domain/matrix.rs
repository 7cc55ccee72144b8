//! Binary solution matrix in the shape of the input tables.

use itertools::Itertools;

use crate::domain::arena::TreeArena;
use crate::domain::solver::Solution;

/// One row per group: item columns first, the group column last.
/// A cell is 1 when the node at that position was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionMatrix {
    pub rows: Vec<Vec<u8>>,
    pub total_cost: u64,
    pub total_profit: u64,
}

impl SolutionMatrix {
    pub fn from_solution(tree: &TreeArena, solution: &Solution) -> Self {
        let mut rows: Vec<Vec<u8>> = tree
            .groups()
            .iter()
            .filter_map(|&group| tree.get_node(group))
            .map(|group| vec![0; group.children.len() + 1])
            .collect();

        for position in solution
            .selection
            .iter()
            .filter_map(|&idx| tree.get_node(idx))
            .filter_map(|node| node.data.position)
        {
            if let Some(cell) = rows
                .get_mut(position.row)
                .and_then(|row| row.get_mut(position.column))
            {
                *cell = 1;
            }
        }

        Self {
            rows,
            total_cost: solution.total_cost,
            total_profit: solution.total_profit,
        }
    }

    /// Render as delimited text with trailing `Cost:` and `Profit:` rows.
    pub fn render(&self, delimiter: char) -> String {
        let sep = delimiter.to_string();
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&row.iter().join(&sep));
            out.push('\n');
        }
        out.push_str(&format!("Cost:{sep}{}\n", self.total_cost));
        out.push_str(&format!("Profit:{sep}{}\n", self.total_profit));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::TreeBuilder;
    use crate::domain::solver::GreedySolver;
    use crate::domain::table::Table;

    #[test]
    fn test_matrix_marks_selected_items_and_groups() {
        let costs = Table::from_rows(vec![vec![3, 4, 2], vec![5, 1]]);
        let profits = Table::from_rows(vec![vec![9, 8, 0], vec![6, 0]]);
        let tree = TreeBuilder::new().build(&costs, &profits).unwrap();
        let mut solver = GreedySolver::new(tree, 8);
        let solution = solver.solve();

        let matrix = SolutionMatrix::from_solution(solver.tree(), &solution);
        assert_eq!(matrix.rows, vec![vec![1, 0, 1], vec![0, 0]]);
        assert_eq!(matrix.render(';'), "1;0;1\n0;0\nCost:;5\nProfit:;9\n");
    }

    #[test]
    fn test_empty_tree_renders_totals_only() {
        let tree = TreeArena::new();
        let solution = GreedySolver::new(tree.clone(), 5).solve();
        let matrix = SolutionMatrix::from_solution(&tree, &solution);
        assert!(matrix.rows.is_empty());
        assert_eq!(matrix.render(','), "Cost:,0\nProfit:,0\n");
    }
}
