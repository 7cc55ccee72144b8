//! Domain layer: tables, the cost/profit tree and the greedy solver
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod matrix;
pub mod node;
pub mod solver;
pub mod table;

pub use arena::{TreeArena, TreeNode};
pub use builder::TreeBuilder;
pub use error::{DomainError, DomainResult};
pub use matrix::SolutionMatrix;
pub use node::{NodeData, NodeKind, Position, SelectionState};
pub use solver::{GreedySolver, Solution};
pub use table::Table;
