//! Integration tests for Settings config loading with layered merge semantics.
//!
//! These tests run without a global config (temp directories only),
//! so they effectively test project config merging with defaults.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use tkp::application::ApplicationError;
use tkp::config::{local_config_path, Settings};

#[test]
fn given_no_project_config_when_load_then_uses_defaults() {
    let project = TempDir::new().unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_project_config_when_load_then_overrides_only_specified_fields() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "bound = 12\ndelimiter = \",\"\noutput_file = \"out/result.csv\"\n",
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(project.path())).expect("load settings");

    // Assert
    assert_eq!(settings.bound, 12);
    assert_eq!(settings.delimiter, ',');
    assert_eq!(settings.output_file, PathBuf::from("out/result.csv"));
    assert_eq!(settings.cost_file, PathBuf::from("cost.csv"));
    assert_eq!(settings.profit_file, PathBuf::from("profit.csv"));
}

#[test]
fn given_invalid_toml_when_load_then_returns_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "bound = [not toml").unwrap();

    let result = Settings::load(Some(project.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_negative_bound_when_load_then_returns_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "bound = -3\n").unwrap();

    let result = Settings::load(Some(project.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_digit_delimiter_when_load_then_returns_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "delimiter = \"5\"\n").unwrap();

    let result = Settings::load(Some(project.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_home_relative_path_when_load_then_expands_tilde() {
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "cost_file = \"~/tables/cost.csv\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert!(!settings.cost_file.starts_with("~"));
    assert!(settings.cost_file.ends_with("tables/cost.csv"));
}

#[test]
fn given_resource_project_when_from_file_then_reads_bound() {
    let settings =
        Settings::from_file(&local_config_path(Path::new("tests/resources/example"))).unwrap();

    assert_eq!(settings.bound, 8);
}

#[test]
fn given_settings_when_serialized_then_round_trips_through_toml() {
    let settings = Settings {
        bound: 17,
        delimiter: '\t',
        ..Default::default()
    };

    let text = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&text).unwrap();

    assert_eq!(parsed, settings);
}
