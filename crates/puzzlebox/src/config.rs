//! `site.toml` loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use puzzlebox_static::SiteConfig;

/// Configuration file structure (site.toml).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub site: SiteConfig,
    pub content: ContentSettings,
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    pub dir: PathBuf,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("content"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub output: PathBuf,
    pub minify: bool,
    pub public: PathBuf,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: PathBuf::from("dist"),
            minify: true,
            public: PathBuf::from("public"),
        }
    }
}

/// Load configuration from `path` if it exists.
///
/// Returns an error if the file exists but is malformed.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = parse(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

fn parse(content: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str(content)
}
