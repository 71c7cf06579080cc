//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.licheck.toml` in repo root
//! 4. `~/.config/licheck/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub projects: Vec<ProjectConfig>,
    pub exclusions: ExclusionsConfig,
    pub detector: DetectorConfig,
    pub telemetry: TelemetryConfig,
}

/// One project-to-license mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name, matched against the repository identifier.
    pub name: String,
    /// Declared SPDX license identifier for the project.
    pub license: String,
}

/// Paths exempt from scanning, as gitignore-style patterns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionsConfig {
    pub paths: Vec<String>,
}

/// External scanner invocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Scanner executable name or path.
    pub command: String,
    /// Per-file timeout passed to the scanner.
    pub timeout_secs: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            command: "scancode".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Whether anonymous usage telemetry is enabled.
    pub enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, repo-local config, then applies
    /// environment variable overrides.
    pub fn load(repo_root: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: repo-local config
        if let Some(root) = repo_root {
            let local_path = root.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file, bypassing layered discovery.
    ///
    /// Environment overrides still apply on top.
    pub fn load_explicit(path: &Path, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.merge(Self::load_file(path)?);
        config.apply_env_vars(env);
        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for
    /// non-default values; project entries from `other` are consulted first).
    fn merge(&mut self, other: Config) {
        if !other.projects.is_empty() {
            let mut projects = other.projects;
            projects.append(&mut self.projects);
            self.projects = projects;
        }

        self.exclusions.paths.extend(other.exclusions.paths);

        let default_detector = DetectorConfig::default();
        if other.detector.command != default_detector.command {
            self.detector.command = other.detector.command;
        }
        if other.detector.timeout_secs != default_detector.timeout_secs {
            self.detector.timeout_secs = other.detector.timeout_secs;
        }

        // Telemetry settings (disabled overrides enabled)
        if !other.telemetry.enabled {
            self.telemetry.enabled = false;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Ok(val) = env.var(constants::ENV_SCANNER) {
            self.detector.command = val;
        }

        if let Ok(val) = env.var(constants::ENV_TELEMETRY) {
            match val.to_lowercase().as_str() {
                "false" | "0" | "no" | "off" => self.telemetry.enabled = false,
                "true" | "1" | "yes" | "on" => self.telemetry.enabled = true,
                _ => eprintln!(
                    "Warning: ignoring invalid {} value: {val}",
                    constants::ENV_TELEMETRY
                ),
            }
        }
    }

    /// Declared license for a repository identifier.
    ///
    /// A project matches when the identifier equals its name or ends with
    /// `/<name>`. Unmatched repositories fall back to the default license.
    pub fn project_license(&self, repo: &str) -> &str {
        self.projects
            .iter()
            .find(|p| repo == p.name || repo.ends_with(&format!("/{}", p.name)))
            .map(|p| p.license.as_str())
            .unwrap_or(constants::DEFAULT_LICENSE)
    }
}
