//! Application services

pub mod knapsack;

pub use knapsack::{KnapsackService, SolveOutput};
