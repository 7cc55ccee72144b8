//! tkp: greedy approximation for the tree knapsack problem.
//!
//! Items are grouped; a group's unlocking cost must be paid before any of its
//! items count. The solver repeatedly picks the node with the best
//! profit-to-cost ratio, charges each group's cost once, and rolls back picks
//! that exceed the capacity bound.
//!
//! ```ignore
//! use tkp::domain::{GreedySolver, Table, TreeBuilder};
//!
//! let costs = Table::parse("3;4;2\n5;1\n", ';')?;
//! let profits = Table::parse("9;8;0\n6;0\n", ';')?;
//! let tree = TreeBuilder::new().build(&costs, &profits)?;
//! let solution = GreedySolver::new(tree, 8).solve();
//! assert_eq!(solution.total_profit, 9);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
