//! Environment overrides live in their own test binary so that setting
//! TKP_* variables cannot leak into other config tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use tkp::config::{local_config_path, Settings};

#[test]
fn given_env_vars_when_load_then_override_project_config() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "bound = 12\n").unwrap();
    std::env::set_var("TKP_BOUND", "21");
    std::env::set_var("TKP_COST_FILE", "data/costs.txt");

    // Act
    let settings = Settings::load(Some(project.path()));
    std::env::remove_var("TKP_BOUND");
    std::env::remove_var("TKP_COST_FILE");

    // Assert
    let settings = settings.expect("load settings");
    assert_eq!(settings.bound, 21);
    assert_eq!(settings.cost_file, PathBuf::from("data/costs.txt"));
    assert_eq!(settings.profit_file, PathBuf::from("profit.csv"));
}
