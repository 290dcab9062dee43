//! Config file loading and setting resolution.
//!
//! Settings resolve in precedence order: explicit CLI flag, then the TOML
//! config file, then the built-in default. The bearer token is deliberately
//! not a config-file field; it comes from a flag or the environment only.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use termlift_types::Environment;

pub const DEFAULT_SERVER: &str = "http://localhost:8080";
const DEFAULT_PLATFORM: &str = "dbt";
const DEFAULT_GLOSSARY_ROOT: &str = "dbt_metrics";

/// Contents of `config.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<String>,
    pub platform: Option<String>,
    pub env: Option<String>,
    pub glossary_root: Option<String>,
}

/// Load the config file: the explicit `--config` path when given (missing
/// file is an error), otherwise the default location (missing file means
/// empty config).
pub fn load(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        return read_file(path);
    }

    match default_path() {
        Some(path) if path.is_file() => read_file(&path),
        _ => Ok(FileConfig::default()),
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("termlift").join("config.toml"))
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Config file loaded");
    Ok(config)
}

/// Fully-resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: String,
    pub platform: String,
    pub env: Environment,
    pub glossary_root: String,
}

impl Settings {
    pub fn resolve(
        file: &FileConfig,
        server: Option<String>,
        platform: Option<String>,
        env: Option<Environment>,
        glossary_root: Option<String>,
    ) -> Result<Self> {
        let file_env = file
            .env
            .as_deref()
            .map(Environment::parse)
            .transpose()
            .context("invalid environment in config file")?;

        Ok(Self {
            server: server
                .or_else(|| file.server.clone())
                .unwrap_or_else(|| DEFAULT_SERVER.to_string()),
            platform: platform
                .or_else(|| file.platform.clone())
                .unwrap_or_else(|| DEFAULT_PLATFORM.to_string()),
            env: env.or(file_env).unwrap_or_default(),
            glossary_root: glossary_root
                .or_else(|| file.glossary_root.clone())
                .unwrap_or_else(|| DEFAULT_GLOSSARY_ROOT.to_string()),
        })
    }
}
