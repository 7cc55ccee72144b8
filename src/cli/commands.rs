//! Command dispatch

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::SolveOutput;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Solve {
            input,
            bound,
            output,
            stdout,
            tree,
        }) => {
            let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
            let mut settings = Settings::load(Some(&project_dir))?;
            input.apply(&mut settings);
            if let Some(bound) = bound {
                settings.bound = *bound;
            }
            if let Some(output) = output {
                settings.output_file = output.clone();
            }
            let container = ServiceContainer::new(settings);
            cmd_solve(&container, &project_dir, *stdout, *tree)
        }
        Some(Commands::Tree { input }) => {
            let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
            let mut settings = Settings::load(Some(&project_dir))?;
            input.apply(&mut settings);
            let container = ServiceContainer::new(settings);
            cmd_tree(&container, &project_dir)
        }
        Some(Commands::Config { command }) => {
            let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
            cmd_config(command, &project_dir)
        }
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run `tkp --help`".to_string(),
        )),
    }
}

fn resolve_project_dir(dir: Option<&Path>) -> CliResult<PathBuf> {
    match dir {
        Some(dir) if !dir.is_dir() => Err(CliError::InvalidArgs(format!(
            "project directory does not exist: {}",
            dir.display()
        ))),
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| CliError::from(InfraError::io("determine current directory", e))),
    }
}

fn input_paths(container: &ServiceContainer, project_dir: &Path) -> (PathBuf, PathBuf) {
    let settings = &container.settings;
    (
        settings.resolve(project_dir, &settings.cost_file),
        settings.resolve(project_dir, &settings.profit_file),
    )
}

#[instrument(skip(container))]
fn cmd_solve(
    container: &ServiceContainer,
    project_dir: &Path,
    to_stdout: bool,
    show_tree: bool,
) -> CliResult<()> {
    let (cost_path, profit_path) = input_paths(container, project_dir);
    let bound = container.settings.bound;
    debug!(cost = %cost_path.display(), profit = %profit_path.display(), bound, "solving");

    let solved = container.knapsack.solve(&cost_path, &profit_path, bound)?;

    if show_tree {
        output::info(&solved.tree.to_termtree());
    }

    if to_stdout {
        let rendered = container.knapsack.render(&solved);
        io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .map_err(|e| InfraError::io("write solution to stdout", e))?;
        return Ok(());
    }

    let output_path = container
        .settings
        .resolve(project_dir, &container.settings.output_file);
    container.knapsack.write_solution(&output_path, &solved)?;
    print_summary(&solved, bound);
    output::action("Wrote", &output_path.display());
    Ok(())
}

fn print_summary(solved: &SolveOutput, bound: u64) {
    output::header("Solution");
    output::field("selected", &solved.solution.selection.len());
    output::field("cost", &format!("{} / {}", solved.solution.total_cost, bound));
    output::field("profit", &solved.solution.total_profit);
    output::field("rounds", &solved.solution.iterations);
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, project_dir: &Path) -> CliResult<()> {
    let (cost_path, profit_path) = input_paths(container, project_dir);
    let tree = container.knapsack.build_tree(&cost_path, &profit_path)?;
    output::info(&tree.to_termtree());
    Ok(())
}

fn cmd_config(command: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let mut paths = Vec::new();
            if let Some(global) = global_config_path() {
                paths.push(("global", global));
            }
            paths.push(("local", local_config_path(project_dir)));
            for (label, path) in paths {
                let line = format!("{}: {}", label, path.display());
                if path.exists() {
                    output::success_detail(&line);
                } else {
                    output::failure(&line);
                }
            }
        }
    }
    Ok(())
}
