//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::config::Settings;

/// Greedy solver for the tree knapsack problem: grouped items with shared unlocking costs
#[derive(Parser, Debug)]
#[command(name = "tkp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory holding the tables and .tkp.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve the instance and write the solution matrix
    Solve {
        #[command(flatten)]
        input: InputArgs,

        /// Capacity bound
        #[arg(short, long)]
        bound: Option<u64>,

        /// Solution file
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Print the solution matrix instead of writing it
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Also print the tree with final costs and states
        #[arg(long)]
        tree: bool,
    },

    /// Show the cost/profit tree built from the tables
    Tree {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Inspect settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Table input overrides shared by commands that read tables.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Cost table
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub cost: Option<PathBuf>,

    /// Profit table
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub profit: Option<PathBuf>,

    /// Cell delimiter
    #[arg(long)]
    pub delimiter: Option<char>,
}

impl InputArgs {
    /// Command-line values take precedence over loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(cost) = &self.cost {
            settings.cost_file = cost.clone();
        }
        if let Some(profit) = &self.profit {
            settings.profit_file = profit.clone();
        }
        if let Some(delimiter) = self.delimiter {
            settings.delimiter = delimiter;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings as TOML
    Show,
    /// Show config file locations
    Path,
}
