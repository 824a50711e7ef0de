//! Configuration loading for omnifocus-mcp
//!
//! Configuration is loaded from:
//! 1. The `--config` command-line flag
//! 2. Environment variable OMNIFOCUS_CONFIG_PATH
//! 3. ~/.binks/omnifocus.toml
//! 4. Default values
//!
//! `OMNIFOCUS_OSASCRIPT` overrides the interpreter from any of these.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// How scripts reach OmniFocus
    #[serde(default)]
    pub bridge: BridgeConfig,
    /// Defaults for the database report
    #[serde(default)]
    pub report: ReportConfig,
}

/// Script interpreter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Interpreter binary, run as `<program> -l JavaScript`
    #[serde(default = "default_program")]
    pub program: String,
    /// Seconds before a script is killed
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Report defaults, used when a tool call leaves an option out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_true")]
    pub hide_completed: bool,
}

fn default_program() -> String {
    "osascript".to_string()
}

fn default_timeout() -> u64 {
    120 // large databases take a while to export
}

fn default_true() -> bool {
    true
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            hide_completed: default_true(),
        }
    }
}

impl Config {
    /// Load configuration, preferring `explicit` over the usual search path
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_path = explicit
            .map(Path::to_path_buf)
            .or_else(Self::find_config_path);

        let mut config = match config_path {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from: {}", path.display());
                Self::from_file(&path)?
            }
            Some(path) if explicit.is_some() => {
                anyhow::bail!("config file not found: {}", path.display());
            }
            _ => {
                tracing::info!("Config file not found, using defaults");
                Self::default()
            }
        };

        if let Ok(program) = std::env::var("OMNIFOCUS_OSASCRIPT") {
            if !program.is_empty() {
                config.bridge.program = program;
            }
        }

        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("OMNIFOCUS_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        dirs::home_dir().map(|home| home.join(".binks").join("omnifocus.toml"))
    }
}
