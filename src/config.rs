//! Configuration for claimcause paths and limits.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (CLAIMCAUSE_HOME, CLAIMCAUSE_MAX_INPUT_BYTES)
//! 2. Config file (.claimcause/config.yaml)
//! 3. Defaults (~/.claimcause, 1MB input limit)
//!
//! Config file discovery:
//! - Searches current directory and parents for .claimcause/config.yaml
//! - Paths in config file are relative to the .claimcause/ directory
//!
//! The extraction thresholds are deliberately absent: they are fixed.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const CONFIG_DIR: &str = ".claimcause";
const DEFAULT_MAX_INPUT_BYTES: usize = 1_048_576; // 1MB

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub limits: Option<LimitsConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory holding the record log (relative to .claimcause/)
    pub home: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    pub max_input_size_bytes: Option<usize>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to claimcause home (record log lives here)
    pub home: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Largest answer the CLI will read
    pub max_input_size_bytes: usize,
}

impl ResolvedConfig {
    pub fn records_path(&self) -> PathBuf {
        self.home.join("extractions.jsonl")
    }
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

fn env_max_input_bytes() -> Result<Option<usize>> {
    match std::env::var("CLAIMCAUSE_MAX_INPUT_BYTES") {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid CLAIMCAUSE_MAX_INPUT_BYTES: {}", value)),
        Err(_) => Ok(None),
    }
}

/// Resolve configuration from an optional config file plus environment
fn resolve(config_file: Option<PathBuf>) -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(CONFIG_DIR);

    let file = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    let home = if let Ok(env_home) = std::env::var("CLAIMCAUSE_HOME") {
        PathBuf::from(env_home)
    } else if let (Some(path), Some(home_path)) = (
        config_file.as_ref(),
        file.as_ref().and_then(|f| f.paths.home.as_ref()),
    ) {
        let config_dir = path.parent().unwrap_or(Path::new("."));
        resolve_path(config_dir, home_path)
    } else {
        default_home
    };

    let max_input_size_bytes = match env_max_input_bytes()? {
        Some(limit) => limit,
        None => file
            .as_ref()
            .and_then(|f| f.limits.as_ref())
            .and_then(|l| l.max_input_size_bytes)
            .unwrap_or(DEFAULT_MAX_INPUT_BYTES),
    };

    Ok(ResolvedConfig {
        home,
        config_file,
        max_input_size_bytes,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_file(&cwd));

    let config = resolve(config_file)?;
    tracing::debug!(home = %config.home.display(), "Configuration loaded");
    Ok(config)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the record log path ($CLAIMCAUSE_HOME/extractions.jsonl)
pub fn records_path() -> Result<PathBuf> {
    Ok(config()?.records_path())
}
