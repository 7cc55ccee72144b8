//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/tkp/tkp.toml`
//! 3. Local config: `<project_dir>/.tkp.toml`
//! 4. Environment variables: `TKP_*` prefix
//!
//! Command-line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Default capacity bound.
pub const DEFAULT_BOUND: u64 = 30;

/// Default cell delimiter for table and solution files.
pub const DEFAULT_DELIMITER: char = ';';

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub bound: Option<u64>,
    pub delimiter: Option<char>,
    pub cost_file: Option<PathBuf>,
    pub profit_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
}

/// Unified configuration for tkp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Capacity bound (default: 30)
    pub bound: u64,
    /// Cell delimiter (default: ';')
    pub delimiter: char,
    /// Cost table (default: cost.csv)
    pub cost_file: PathBuf,
    /// Profit table (default: profit.csv)
    pub profit_file: PathBuf,
    /// Solution matrix (default: solution.csv)
    pub output_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bound: DEFAULT_BOUND,
            delimiter: DEFAULT_DELIMITER,
            cost_file: PathBuf::from("cost.csv"),
            profit_file: PathBuf::from("profit.csv"),
            output_file: PathBuf::from("solution.csv"),
        }
    }
}

/// Get the XDG config directory for tkp.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tkp").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("tkp.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".tkp.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Load settings from a single TOML file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ApplicationError> {
        let raw = load_raw_settings(path)?;
        let mut settings = Self::default().merge_with(&raw);
        settings.expand_paths();
        settings.validate()?;
        Ok(settings)
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            bound: overlay.bound.unwrap_or(self.bound),
            delimiter: overlay.delimiter.unwrap_or(self.delimiter),
            cost_file: overlay
                .cost_file
                .clone()
                .unwrap_or_else(|| self.cost_file.clone()),
            profit_file: overlay
                .profit_file
                .clone()
                .unwrap_or_else(|| self.profit_file.clone()),
            output_file: overlay
                .output_file
                .clone()
                .unwrap_or_else(|| self.output_file.clone()),
        }
    }

    /// Apply TKP_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TKP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        match config.get_int("bound") {
            Ok(val) => {
                settings.bound = u64::try_from(val).map_err(|_| ApplicationError::Config {
                    message: format!("TKP_BOUND must be non-negative, got {}", val),
                })?;
            }
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        if let Ok(val) = config.get_string("delimiter") {
            settings.delimiter = single_char(&val)?;
        }
        if let Ok(val) = config.get_string("cost_file") {
            settings.cost_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("profit_file") {
            settings.profit_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("output_file") {
            settings.output_file = PathBuf::from(val);
        }

        Ok(settings)
    }

    /// Expand `~` and `$VAR` in path fields. Unresolvable variables leave the path as is.
    fn expand_paths(&mut self) {
        for path in [
            &mut self.cost_file,
            &mut self.profit_file,
            &mut self.output_file,
        ] {
            let raw = path.to_string_lossy().into_owned();
            if let Ok(expanded) = shellexpand::full(&raw) {
                *path = PathBuf::from(expanded.into_owned());
            }
        }
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.delimiter.is_ascii_digit() || self.delimiter == '\n' {
            return Err(ApplicationError::Config {
                message: format!("unusable delimiter: {:?}", self.delimiter),
            });
        }
        Ok(())
    }

    /// Resolve a possibly relative path against the project directory.
    pub fn resolve(&self, project_dir: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_dir.join(path)
        }
    }

    /// Serialize to TOML for display.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}

fn single_char(value: &str) -> Result<char, ApplicationError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::Config {
            message: format!("delimiter must be a single character, got {:?}", value),
        }),
    }
}
