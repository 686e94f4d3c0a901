//! Builder configuration.
//!
//! An explicit struct handed to the pipeline, replacing hard-coded
//! directory constants. Defaults mirror the standard repo layout
//! (`skills/` in, `dist/skills/` out) and can be overridden from
//! `skillpack.toml` or a user-level config file.

use crate::collect::ExcludeSet;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Extra exclusions applied on top of the built-in ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExcludeConfig {
    /// Directory names pruned during collection.
    pub dirs: Vec<String>,
    /// File names left out of aggregation.
    pub files: Vec<String>,
}

/// Main configuration structure.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory holding one subdirectory per skill.
    pub skills_dir: PathBuf,
    /// Distribution directory for `build` output.
    pub dist_dir: PathBuf,
    pub exclude: ExcludeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            skills_dir: PathBuf::from("skills"),
            dist_dir: PathBuf::from("dist/skills"),
            exclude: ExcludeConfig::default(),
        }
    }
}

/// On-disk config shape; fields absent from the file stay untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    skills_dir: Option<PathBuf>,
    dist_dir: Option<PathBuf>,
    exclude: ExcludeConfig,
}

impl Config {
    /// Load configuration from default paths.
    /// Priority: project (skillpack.toml) > user (~/.skillpack/config.toml) > built-in defaults.
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".skillpack").join("config.toml");
            if user_config.exists() {
                config.apply_file(&user_config)?;
            }
        }

        let project_config = Path::new("skillpack.toml");
        if project_config.exists() {
            config.apply_file(project_config)?;
        }

        Ok(config)
    }

    /// Load defaults overridden by one specific config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Config::default();
        config.apply_file(path)?;
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let file: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;

        if let Some(skills_dir) = file.skills_dir {
            self.skills_dir = skills_dir;
        }
        if let Some(dist_dir) = file.dist_dir {
            self.dist_dir = dist_dir;
        }
        // Exclusion lists concatenate across layers.
        self.exclude.dirs.extend(file.exclude.dirs);
        self.exclude.files.extend(file.exclude.files);
        Ok(())
    }

    /// Full exclusion set: built-ins plus configured extras.
    pub fn exclude_set(&self) -> ExcludeSet {
        ExcludeSet::with_extra(&self.exclude.files, &self.exclude.dirs)
    }
}
