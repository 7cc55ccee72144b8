//! Knapsack service
//!
//! Loads cost/profit tables, builds the tree, runs the greedy solver and
//! writes the solution matrix.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{GreedySolver, Solution, SolutionMatrix, Table, TreeArena, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Everything a solver run produces.
#[derive(Debug, Clone)]
pub struct SolveOutput {
    /// Tree in its final state (costs and states after solving)
    pub tree: TreeArena,
    pub solution: Solution,
    pub matrix: SolutionMatrix,
}

/// Service running the greedy solver against table files.
pub struct KnapsackService {
    fs: Arc<dyn FileSystem>,
    delimiter: char,
}

impl KnapsackService {
    /// Create a new knapsack service reading cells split on `delimiter`.
    pub fn new(fs: Arc<dyn FileSystem>, delimiter: char) -> Self {
        Self { fs, delimiter }
    }

    /// Read and parse both tables.
    #[instrument(level = "debug", skip(self))]
    pub fn load_tables(&self, cost_path: &Path, profit_path: &Path) -> ApplicationResult<(Table, Table)> {
        let costs = self.load_table(cost_path, "read cost table")?;
        let profits = self.load_table(profit_path, "read profit table")?;
        debug!(cost_rows = costs.len(), profit_rows = profits.len(), "tables loaded");
        Ok((costs, profits))
    }

    fn load_table(&self, path: &Path, action: &str) -> ApplicationResult<Table> {
        let content = self.fs.read_to_string(path).with_path_context(action, path)?;
        Ok(Table::parse(&content, self.delimiter)?)
    }

    /// Build the cost/profit tree from table files.
    pub fn build_tree(&self, cost_path: &Path, profit_path: &Path) -> ApplicationResult<TreeArena> {
        let (costs, profits) = self.load_tables(cost_path, profit_path)?;
        Ok(TreeBuilder::new().build(&costs, &profits)?)
    }

    /// Solve the instance described by the table files.
    #[instrument(level = "debug", skip(self))]
    pub fn solve(&self, cost_path: &Path, profit_path: &Path, bound: u64) -> ApplicationResult<SolveOutput> {
        let tree = self.build_tree(cost_path, profit_path)?;
        Ok(Self::solve_tree(tree, bound))
    }

    /// Solve an already built tree.
    pub fn solve_tree(tree: TreeArena, bound: u64) -> SolveOutput {
        let mut solver = GreedySolver::new(tree, bound);
        let solution = solver.solve();
        let tree = solver.into_tree();
        let matrix = SolutionMatrix::from_solution(&tree, &solution);
        info!(
            total_cost = solution.total_cost,
            total_profit = solution.total_profit,
            selected = solution.selection.len(),
            "solved"
        );
        SolveOutput {
            tree,
            solution,
            matrix,
        }
    }

    /// Render the solution matrix as text.
    pub fn render(&self, output: &SolveOutput) -> String {
        output.matrix.render(self.delimiter)
    }

    /// Write the solution matrix to `path`, creating parent directories.
    #[instrument(level = "debug", skip(self, output))]
    pub fn write_solution(&self, path: &Path, output: &SolveOutput) -> ApplicationResult<()> {
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, &self.render(output))
            .with_path_context("write solution", path)?;
        debug!(path = %path.display(), "solution written");
        Ok(())
    }
}
